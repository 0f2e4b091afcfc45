use glpk_model::{
    with_logger, with_presolve, with_verbose, Direction, Error, Model, ModelError, Solution,
    SolveError, SolveMethod, SolveStatus, Variable, VariableKind,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;

const DELTA: f64 = 1e-7;
const INF: f64 = f64::INFINITY;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < DELTA,
        "expected {} but got {}",
        expected,
        actual
    );
}

/// maximize x1 + 2x2 + 3x3 + x4 with x4 integer
fn mip_model() -> (Model, Vec<Variable>) {
    let mut model = Model::new("mip", Direction::Maximize).unwrap();
    let x1 = model
        .add_defined_variable("x1", VariableKind::Continuous, 1.0, 0.0, 40.0)
        .unwrap();
    let x2 = model
        .add_defined_variable("x2", VariableKind::Continuous, 2.0, 0.0, INF)
        .unwrap();
    let x3 = model
        .add_defined_variable("x3", VariableKind::Continuous, 3.0, 0.0, INF)
        .unwrap();
    let x4 = model
        .add_defined_variable("x4", VariableKind::Integer, 1.0, 2.0, 3.0)
        .unwrap();

    model
        .add_constraint(0.0, 20.0, &[x1, x2, x3, x4], &[-1.0, 1.0, 1.0, 10.0])
        .unwrap();
    model
        .add_constraint(0.0, 30.0, &[x1, x2, x3], &[1.0, -3.0, 1.0])
        .unwrap();
    model.add_constraint(0.0, 0.0, &[x2, x4], &[1.0, -3.5]).unwrap();
    (model, vec![x1, x2, x3, x4])
}

/// maximize x1 + 2x2 - 3x3, with the equality row over `(equal_var, x3)`
fn scenario_lp(equal_var: usize) -> (Model, Vec<Variable>) {
    let mut model = Model::new("lp", Direction::Maximize).unwrap();
    let x1 = model
        .add_defined_variable("x1", VariableKind::Continuous, 1.0, 0.0, 40.0)
        .unwrap();
    let x2 = model.add_variable("x2").unwrap();
    model.set_coefficient(x2, 2.0).unwrap();
    let x3 = model
        .add_defined_variable("x3", VariableKind::Continuous, -3.0, 5.0, 11.0)
        .unwrap();
    let vars = vec![x1, x2, x3];

    model
        .add_constraint(0.0, 10.0, &[x1, x2, x3], &[-1.0, 1.0, 5.3])
        .unwrap();
    model
        .add_constraint(-INF, 20.0, &[x1, x2, x3], &[2.0, -5.0, 3.0])
        .unwrap();
    model
        .add_constraint(0.0, 0.0, &[vars[equal_var], x3], &[1.0, -8.0])
        .unwrap();
    (model, vars)
}

/// `size` integer variables, variable i bounded to [-i, i] by its own row
fn big_model(size: usize) -> Model {
    let mut model = Model::new("big", Direction::Maximize).unwrap();
    for i in 0..size {
        let x = model.add_integer_variable(&format!("x{}", i)).unwrap();
        model
            .add_constraint(-(i as f64), i as f64, &[x], &[1.0])
            .unwrap();
    }
    model
}

#[test]
fn test_solve_mip() {
    init_logging();
    let (mut model, vars) = mip_model();
    let result = model.solve().unwrap();

    assert_eq!(result.status(), SolveStatus::Optimal);
    assert_eq!(result.method(), SolveMethod::BranchCut);
    assert_close(result.objective_value(), 122.5);
    for (var, expected) in vars.iter().zip([40.0, 10.5, 19.5, 3.0]) {
        assert_close(result.value(*var).unwrap(), expected);
    }
}

#[test]
fn test_solve_mip_without_presolve() {
    let (mut model, vars) = mip_model();
    model.set_presolve(false);
    let result = model.solve_branch_cut().unwrap();
    assert_close(result.objective_value(), 122.5);
    assert_close(result.value(vars[3]).unwrap(), 3.0);
}

#[test]
fn test_solve_lp() {
    let mut model = Model::new("lp", Direction::Maximize).unwrap();
    let x1 = model
        .add_defined_variable("x1", VariableKind::Continuous, 1.0, 0.0, INF)
        .unwrap();
    let x2 = model
        .add_defined_variable("x2", VariableKind::Continuous, 2.0, 0.0, INF)
        .unwrap();
    let x3 = model
        .add_defined_variable("x3", VariableKind::Continuous, -1.0, 0.0, INF)
        .unwrap();
    model
        .add_constraint(0.0, 14.0, &[x1, x2, x3], &[2.0, 1.0, 1.0])
        .unwrap();
    model
        .add_constraint(0.0, 28.0, &[x1, x2, x3], &[4.0, 2.0, 3.0])
        .unwrap();
    model
        .add_constraint(0.0, 30.0, &[x1, x2, x3], &[2.0, 5.0, 5.0])
        .unwrap();

    let result = model.solve().unwrap();
    assert_eq!(result.status(), SolveStatus::Optimal);
    assert_eq!(result.method(), SolveMethod::Simplex);
    assert_close(result.objective_value(), 13.0);
    for (var, expected) in [x1, x2, x3].into_iter().zip([5.0, 4.0, 0.0]) {
        assert_close(result.value(var).unwrap(), expected);
    }
}

#[test]
fn test_solve_scenario_lp() {
    let (mut model, vars) = scenario_lp(0);
    let result = model.solve().unwrap();
    assert_eq!(result.status(), SolveStatus::Optimal);
    assert_close(result.objective_value(), 72.0);
    for (var, expected) in vars.iter().zip([40.0, 23.5, 5.0]) {
        assert_close(result.primal_value(*var).unwrap(), expected);
    }
}

#[test]
fn test_scenario_lp_with_x2_equality_is_infeasible() {
    // x2 = 8x3 forces -x1 + 13.3x3 <= 10 with x3 >= 5, so x1 >= 56.5 > 40
    let (mut model, _) = scenario_lp(1);
    model.set_presolve(false);
    assert_eq!(
        model.solve().unwrap_err(),
        Error::Solve(SolveError::ModelInfeasible)
    );
}

#[test]
fn test_simplex_on_mip_solves_relaxation() {
    let (mut model, _) = mip_model();
    let result = model.solve_simplex().unwrap();
    assert_eq!(result.method(), SolveMethod::Simplex);
    assert!(result.objective_value() >= 122.5 - DELTA);
}

#[test]
fn test_dual_values() {
    // minimize x + 3y subject to x + y >= 2: x is basic, y prices out at 3 - 1
    let mut model = Model::new("dual", Direction::Minimize).unwrap();
    let x = model
        .add_defined_variable("x", VariableKind::Continuous, 1.0, 0.0, INF)
        .unwrap();
    let y = model
        .add_defined_variable("y", VariableKind::Continuous, 3.0, 0.0, INF)
        .unwrap();
    model.add_constraint(2.0, INF, &[x, y], &[1.0, 1.0]).unwrap();

    let result = model.solve().unwrap();
    assert_close(result.objective_value(), 2.0);
    assert_close(result.dual_value(x).unwrap(), 0.0);
    assert_close(result.dual_value(y).unwrap(), 2.0);
}

#[test]
fn test_dual_values_are_unavailable_after_branch_cut() {
    let (mut model, vars) = mip_model();
    {
        let result = model.solve().unwrap();
        assert_eq!(result.method(), SolveMethod::BranchCut);
        assert_eq!(
            result.dual_value(vars[0]),
            Err(Error::Model(ModelError::DualUnavailable))
        );
    }
    let result = model.solve_simplex().unwrap();
    assert!(result.dual_value(vars[0]).is_ok());
}

#[test]
fn test_dual_simplex_matches_primal() {
    let (mut model, vars) = scenario_lp(0);
    let result = model.solve_simplex_dual().unwrap();
    assert_eq!(result.status(), SolveStatus::Optimal);
    assert_close(result.objective_value(), 72.0);
    for (var, expected) in vars.iter().zip([40.0, 23.5, 5.0]) {
        assert_close(result.value(*var).unwrap(), expected);
    }
}

#[test]
fn test_fractional_integer_bounds() {
    // maximize x + y with integer x in [0.5, 3.5], y in [-1.5, 2.7] and x + y <= 10
    let mut model = Model::new("fractional", Direction::Maximize).unwrap();
    let x = model
        .add_defined_variable("x", VariableKind::Integer, 1.0, 0.5, 3.5)
        .unwrap();
    let y = model
        .add_defined_variable("y", VariableKind::Integer, 1.0, -1.5, 2.7)
        .unwrap();
    model
        .add_constraint(-INF, 10.0, &[x, y], &[1.0, 1.0])
        .unwrap();

    {
        let result = model.solve().unwrap();
        assert_eq!(result.status(), SolveStatus::Optimal);
        assert_close(result.objective_value(), 5.0);
        assert_close(result.value(x).unwrap(), 3.0);
        assert_close(result.value(y).unwrap(), 2.0);
    }
    assert_eq!(model.bounds(x).unwrap(), (0.5, 3.5));
    assert_eq!(model.bounds(y).unwrap(), (-1.5, 2.7));
}

#[test]
fn test_solution_snapshot_serializes() {
    let (mut model, _) = mip_model();
    let solution = model.solve().unwrap().to_solution();
    assert_eq!(solution.status, SolveStatus::Optimal);
    assert_close(solution.values["x2"], 10.5);

    let json = serde_json::to_string(&solution).unwrap();
    let parsed: Solution = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, solution);
}

#[test]
fn test_model_is_reusable_after_result() {
    let (mut model, vars) = mip_model();
    {
        let result = model.solve().unwrap();
        assert_close(result.objective_value(), 122.5);
    }
    model.set_bounds(vars[0], 0.0, 30.0).unwrap();
    let result = model.solve().unwrap();
    assert!(result.objective_value() < 122.5);
    assert_close(result.value(vars[0]).unwrap(), 30.0);
}

#[test]
fn test_clone_solves_independently() {
    let (mut original, vars) = mip_model();
    let mut copy = original.clone();
    let copy_vars = copy.variables();
    copy.set_bounds(copy_vars[0], 0.0, 30.0).unwrap();

    assert_close(original.solve().unwrap().value(vars[0]).unwrap(), 40.0);
    assert_close(copy.solve().unwrap().value(copy_vars[0]).unwrap(), 30.0);
    assert!(matches!(
        copy.solve().unwrap().value(vars[0]),
        Err(Error::Model(_))
    ));
}

#[test]
fn test_verbose_output_goes_to_logger() {
    let lines = Arc::new(Mutex::new(Vec::<String>::new()));
    let sink = Arc::clone(&lines);
    let mut model = Model::with_options(
        "verbose",
        Direction::Maximize,
        vec![
            with_verbose(true),
            with_presolve(false),
            with_logger(move |message: &str| {
                sink.lock().push(message.to_string())
            }),
        ],
    )
    .unwrap();
    let x = model
        .add_defined_variable("x", VariableKind::Continuous, 1.0, 0.0, 1.0)
        .unwrap();
    model.add_constraint(-INF, 0.5, &[x], &[1.0]).unwrap();
    model.solve().unwrap();

    let lines = lines.lock();
    assert!(!lines.is_empty());
}

#[test]
fn test_quiet_model_logs_nothing() {
    let lines = Arc::new(Mutex::new(Vec::<String>::new()));
    let sink = Arc::clone(&lines);
    let (mut model, _) = mip_model();
    model.set_logger(Arc::new(move |message: &str| {
        sink.lock().push(message.to_string())
    }));
    model.solve().unwrap();
    assert!(lines.lock().is_empty());
}

#[test]
fn test_big_model() {
    let mut model = big_model(2000);
    let result = model.solve().unwrap();
    assert_close(result.objective_value(), 1999000.0);
}

#[test]
fn test_parallel_threads() {
    let handles: Vec<_> = (0..2)
        .map(|_| {
            thread::spawn(|| {
                let mut model = big_model(2000);
                let result = model.solve().unwrap();
                result.objective_value()
            })
        })
        .collect();
    for handle in handles {
        assert_close(handle.join().unwrap(), 1999000.0);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_parallel_blocking_tasks() {
    let first = tokio::task::spawn_blocking(|| {
        let (mut model, _) = mip_model();
        let objective = model.solve().unwrap().objective_value();
        objective
    });
    let second = tokio::task::spawn_blocking(|| {
        let mut model = big_model(500);
        let objective = model.solve().unwrap().objective_value();
        objective
    });

    assert_close(first.await.unwrap(), 122.5);
    assert_close(second.await.unwrap(), 124750.0);
}
