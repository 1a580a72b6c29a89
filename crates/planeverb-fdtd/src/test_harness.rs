/// Scenario tests for whole generation runs: causality, wall behaviour,
/// edge termination, determinism across thread counts and query consistency.

#[cfg(test)]
mod tests {
    use glam::{UVec2, Vec3};
    use planeverb_core::excitation::{gaussian_pulse, unit_impulse};
    use planeverb_core::{BoundaryKind, Cell, GridConfig, Real};

    use crate::field::CellField;
    use crate::grid::Grid;
    use crate::passes;

    fn config(size: u32, samples: usize, max_threads: usize) -> GridConfig {
        GridConfig {
            size_x: size,
            size_y: size,
            cell_size: 0.5,
            time_step: GridConfig::stable_time_step(0.5) * 0.95,
            response_samples: samples,
            max_threads,
            ..GridConfig::default()
        }
    }

    fn manhattan(a: UVec2, b: UVec2) -> u32 {
        a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
    }

    fn all_cells(size: u32) -> impl Iterator<Item = UVec2> {
        (0..=size).flat_map(move |ix| (0..=size).map(move |iy| UVec2::new(ix, iy)))
    }

    #[test]
    fn test_silent_excitation_stays_silent() {
        let cfg = config(8, 20, 2);
        let mut grid = Grid::new(cfg, vec![0.0; 20]).expect("grid");
        grid.fill_rect(UVec2::new(2, 2), UVec2::new(2, 6), BoundaryKind::Absorptive(0.3))
            .expect("in bounds");
        grid.generate_response(Vec3::ZERO).expect("cpu run");

        for cell in all_cells(8) {
            let series = grid.response_at(cell.x, cell.y).expect("series");
            assert!(series.iter().all(|c| c.pressure == 0.0
                && c.velocity_x == 0.0
                && c.velocity_y == 0.0));
        }
    }

    #[test]
    fn test_four_by_four_impulse_scenario() {
        let cfg = config(4, 6, 1);
        let mut grid = Grid::new(cfg, unit_impulse(6)).expect("grid");
        grid.generate_response(Vec3::ZERO).expect("cpu run");

        let listener = UVec2::new(2, 2);
        assert_eq!(grid.listener_cell(), Some(listener));

        // t = 0: only the injected pulse.
        for cell in all_cells(4) {
            let p0 = grid.response_at(cell.x, cell.y).expect("series")[0].pressure;
            if cell == listener {
                assert_eq!(p0, 1.0);
            } else {
                assert_eq!(p0, 0.0, "cell {cell} at t=0");
            }
        }

        // t = 1: the pulse has driven the faces around the listener. Injection
        // is the last pass of a step, so the pulse first reaches a pressure
        // update at t = 1 and the neighbours' pressure at t = 2.
        let at = |ix, iy, t: usize| grid.response_at(ix, iy).expect("series")[t];
        assert!(at(2, 2, 1).velocity_x < 0.0);
        assert!(at(3, 2, 1).velocity_x > 0.0);
        assert!(at(2, 2, 1).velocity_y < 0.0);
        assert!(at(2, 3, 1).velocity_y > 0.0);

        // From t = 2 the pressure front grows by one ring per step.
        for t in 2..=3usize {
            let ring = t as u32 - 1;
            for cell in all_cells(4) {
                let p = at(cell.x, cell.y, t).pressure;
                let d = manhattan(cell, listener);
                if d == ring {
                    assert!(p != 0.0, "ring {ring} cell {cell} silent at t={t}");
                } else if d > ring {
                    assert_eq!(p, 0.0, "cell {cell} ahead of front at t={t}");
                }
            }
        }
    }

    #[test]
    fn test_causality_bound() {
        let size = 12;
        let cfg = config(size, 10, 2);
        let mut grid = Grid::new(cfg, unit_impulse(10)).expect("grid");
        grid.generate_response(Vec3::ZERO).expect("cpu run");
        let listener = grid.listener_cell().expect("complete");

        for cell in all_cells(size) {
            let d = manhattan(cell, listener) as usize;
            let series = grid.response_at(cell.x, cell.y).expect("series");
            for (t, snapshot) in series.iter().enumerate().take(d.min(series.len())) {
                assert_eq!(
                    snapshot.pressure, 0.0,
                    "cell {cell} at distance {d} reached at t={t}"
                );
            }
        }
    }

    #[test]
    fn test_walls_are_pressure_nodes() {
        let size = 10;
        let cfg = config(size, 40, 2);
        let samples = cfg.response_samples;
        let mut grid = Grid::new(cfg.clone(), gaussian_pulse(samples, cfg.time_step, 275.0))
            .expect("grid");
        grid.fill_rect(UVec2::new(7, 0), UVec2::new(7, 10), BoundaryKind::Rigid)
            .expect("in bounds");
        grid.fill_rect(UVec2::new(2, 3), UVec2::new(3, 3), BoundaryKind::Absorptive(0.2))
            .expect("in bounds");
        grid.generate_response(Vec3::ZERO).expect("cpu run");

        for cell in all_cells(size) {
            if grid.cell(cell.x, cell.y).expect("cell").kind().is_air() {
                continue;
            }
            let series = grid.response_at(cell.x, cell.y).expect("series");
            assert!(
                series.iter().all(|c| c.pressure == 0.0),
                "wall cell {cell} carried pressure"
            );
        }

        // Listener inside a wall: the excitation is absorbed entirely.
        grid.set_cell(5, 5, BoundaryKind::Rigid).expect("in bounds");
        grid.generate_response(Vec3::ZERO).expect("cpu run");
        let listener = grid.response_at(5, 5).expect("series");
        assert!(listener.iter().all(|c| c.pressure == 0.0));
    }

    #[test]
    fn test_edge_velocity_tracks_pressure_every_step() {
        let size = 8;
        let cfg = config(size, 30, 2);
        let mut grid = Grid::new(cfg, unit_impulse(30)).expect("grid");
        grid.generate_response(Vec3::ZERO).expect("cpu run");

        let series = |ix, iy| grid.response_at(ix, iy).expect("series");
        for t in 0..30 {
            for iy in 0..size {
                assert_eq!(series(0, iy)[t].velocity_x, -series(0, iy)[t].pressure);
                assert_eq!(series(size, iy)[t].velocity_x, series(size - 1, iy)[t].pressure);
            }
            for ix in 0..size {
                assert_eq!(series(ix, 0)[t].velocity_y, -series(ix, 0)[t].pressure);
                assert_eq!(series(ix, size)[t].velocity_y, series(ix, size - 1)[t].pressure);
            }
        }
    }

    fn run_with_threads(max_threads: usize) -> Vec<Vec<Cell>> {
        let size = 16;
        let cfg = config(size, 24, max_threads);
        let mut grid = Grid::new(cfg.clone(), gaussian_pulse(24, cfg.time_step, 400.0))
            .expect("grid");
        grid.fill_rect(UVec2::new(4, 2), UVec2::new(4, 12), BoundaryKind::Absorptive(0.6))
            .expect("in bounds");
        grid.fill_rect(UVec2::new(11, 5), UVec2::new(13, 6), BoundaryKind::Rigid)
            .expect("in bounds");
        grid.generate_response(Vec3::new(0.75, 0.0, -1.25)).expect("cpu run");
        all_cells(size)
            .map(|c| grid.response_at(c.x, c.y).expect("series").to_vec())
            .collect()
    }

    #[test]
    fn test_deterministic_across_thread_counts() {
        let single = run_with_threads(1);
        let many = run_with_threads(4);
        assert_eq!(single, many);
        assert_eq!(single, run_with_threads(1));
    }

    #[test]
    fn test_queries_match_manual_stepping() {
        let size = 6;
        let cfg = config(size, 12, 2);
        let excitation = gaussian_pulse(12, cfg.time_step, 500.0);
        let mut grid = Grid::new(cfg.clone(), excitation.clone()).expect("grid");
        grid.set_cell(1, 4, BoundaryKind::Absorptive(0.5)).expect("in bounds");
        grid.generate_response(Vec3::ZERO).expect("cpu run");

        let mut field = CellField::new(size, size);
        field.set_kind(UVec2::new(1, 4), BoundaryKind::Absorptive(0.5));
        let listener = field.index_of(UVec2::new(3, 3)).expect("in bounds");
        let courant: Real = cfg.courant();
        let mapping = grid.mapping().expect("complete");

        for (t, &sample) in excitation.iter().enumerate() {
            passes::step(&mut field, courant, listener, sample);
            for cell in all_cells(size) {
                let expected = field.get(cell).expect("in bounds");
                let by_index = grid.response_at(cell.x, cell.y).expect("series");
                let by_world = grid.response(mapping.grid_to_world(cell)).expect("series");
                assert!(std::ptr::eq(by_index, by_world));
                assert_eq!(by_index.len(), 12);
                assert_eq!(by_index[t], expected, "cell {cell} at t={t}");
            }
        }
    }
}
