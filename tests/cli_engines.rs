//! Solves driven through shell scripts that stand in for the real engines.
//!
//! Each script records its argument vector (and a copy of the model file)
//! under a `record` directory outside the working directory, then produces a
//! canned report the way the real engine would.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use letsopt_cli::{
    CoinCbcSolver, Constraint, CplexSolver, EngineConfig, FileType, GlpkSolver, LinearExpression,
    LpSolveSolver, Model, Solution, SolutionStatus, SolveOptions, SolverBackend, SolverError,
    SolverFactory, SolverService, Variable, VariableId,
};
use serial_test::serial;
use tempfile::TempDir;

const CBC_INFEASIBLE: &str = "\
Infeasible - objective value 130.00000000
      0 x1                    30                       0
**    1 x2                    20                       0";

const CPLEX_PRESOLVE_INFEASIBLE: &str = "\
Welcome to IBM(R) ILOG(R) CPLEX(R) Interactive Optimizer 12.10.0.0
CPLEX> Problem 'model.lp' read.
Read time = 0.00 sec. (0.00 ticks)
CPLEX> Row 'c2' infeasible, all entries at implied bounds.
Presolve time = 0.00 sec. (0.00 ticks)
Presolve - Infeasible.
Solution time =    0.00 sec.
CPLEX> No solution exists.
CPLEX> ";

const GLPK_OPTIMAL: &str = "\
Problem:    model
Rows:       3
Columns:    2
Status:     OPTIMAL
Objective:  obj = 120 (MAXimum)

   No. Column name  St   Activity     Lower bound   Upper bound    Marginal
------ ------------ -- ------------- ------------- ------------- -------------
     1 x1           NL            30            30            40        < eps
     2 x2           B             15            20

End of output";

const LP_SOLVE_OPTIMAL: &str = "
Value of objective function: 120.00000000

Actual values of the variables:
x1                             30
x2                             15

Actual values of the constraints:
c1                          0.975
c2                              0.9";

struct Fixture {
    _root: TempDir,
    bin: PathBuf,
    work: PathBuf,
    record: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let bin = root.path().join("bin");
        let work = root.path().join("work");
        let record = root.path().join("record");
        for dir in [&bin, &work, &record] {
            fs::create_dir(dir).unwrap();
        }
        Self {
            _root: root,
            bin,
            work,
            record,
        }
    }

    /// Install an executable script called `name`.
    fn engine(&self, name: &str, body: &str) -> PathBuf {
        let path = self.bin.join(name);
        let script = format!(
            "#!/bin/sh\nprintf '%s\\n' \"$@\" > '{record}/args'\n{body}\n",
            record = self.record.display(),
            body = body
        );
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// Engine that copies argument `model_arg` and writes `report` to its last argument.
    fn solution_file_engine(&self, name: &str, model_arg: usize, report: &str) -> PathBuf {
        let body = format!(
            "cp \"${model_arg}\" '{record}/model'\nfor last; do :; done\ncat > \"$last\" <<'REPORT'\n{report}\nREPORT",
            model_arg = model_arg,
            record = self.record.display(),
            report = report
        );
        self.engine(name, &body)
    }

    /// Engine that prints `report` on standard output.
    fn stdout_engine(&self, name: &str, report: &str) -> PathBuf {
        self.engine(name, &format!("cat <<'REPORT'\n{}\nREPORT", report))
    }

    fn args(&self) -> Vec<String> {
        fs::read_to_string(self.record.join("args"))
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn recorded_model(&self) -> String {
        fs::read_to_string(self.record.join("model")).unwrap()
    }

    fn engine_ran(&self) -> bool {
        self.record.join("args").exists()
    }

    fn work_entries(&self) -> Vec<PathBuf> {
        fs::read_dir(&self.work)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect()
    }

    fn options(&self) -> SolveOptions {
        SolveOptions::new().with_directory(&self.work)
    }
}

fn production_model() -> (Model, VariableId, VariableId) {
    let mut model = Model::new();
    let x1 = model.add_variable(Variable::new().with_bounds(30.0, 40.0)).unwrap();
    let x2 = model.add_variable(Variable::new().with_lower_bound(20.0)).unwrap();
    model
        .maximize(LinearExpression::new().term(x1, 3.0).term(x2, 2.0))
        .unwrap();
    model
        .add_constraint(Constraint::le(
            LinearExpression::new().term(x1, 1.0 / 40.0).term(x2, 1.0 / 60.0),
            1.0,
        ))
        .unwrap();
    model
        .add_constraint(Constraint::le(
            LinearExpression::new().term(x1, 1.0 / 50.0).term(x2, 1.0 / 50.0),
            1.0,
        ))
        .unwrap();
    (model, x1, x2)
}

#[test]
#[serial]
fn test_cbc_then_cplex_on_same_model() {
    let fixture = Fixture::new();
    let (mut model, x1, x2) = production_model();

    let cbc = CoinCbcSolver::with_config(EngineConfig::new(
        fixture.solution_file_engine("cbc", 1, CBC_INFEASIBLE),
        FileType::Lp,
    ));
    cbc.solve(&mut model, &fixture.options()).unwrap();

    assert_eq!(model.status(), SolutionStatus::Infeasible);
    assert_relative_eq!(model.objective_value().unwrap(), 130.0, epsilon = 1e-8);
    assert_relative_eq!(model.value(x1).unwrap(), 30.0, epsilon = 1e-8);
    assert_relative_eq!(model.value(x2).unwrap(), 20.0, epsilon = 1e-8);
    assert!(fixture.recorded_model().contains("subject to"));
    assert!(fixture.work_entries().is_empty());

    model.clear();
    assert_eq!(model.value(x1), None);

    let cplex = CplexSolver::with_config(EngineConfig::new(
        fixture.stdout_engine("cplex", CPLEX_PRESOLVE_INFEASIBLE),
        FileType::Lp,
    ));
    cplex.solve(&mut model, &fixture.options()).unwrap();

    assert_eq!(model.status(), SolutionStatus::Undefined);
    assert_eq!(model.objective_value(), None);
    assert_eq!(model.value(x1), None);
    assert_eq!(model.value(x2), None);
    assert!(fixture.work_entries().is_empty());

    let args = fixture.args();
    assert_eq!(args[0], "-c");
    assert!(args[1].starts_with("read ") && args[1].ends_with(".lp"), "{:?}", args);
    assert_eq!(&args[2..], ["optimize", "display solution variables -"]);
}

#[test]
#[serial]
fn test_auto_directory_is_removed() {
    let fixture = Fixture::new();
    let (mut model, _, _) = production_model();
    let cbc = CoinCbcSolver::with_config(EngineConfig::new(
        fixture.solution_file_engine("cbc", 1, CBC_INFEASIBLE),
        FileType::Lp,
    ));

    cbc.solve(&mut model, &SolveOptions::new()).unwrap();

    let args = fixture.args();
    let model_path = Path::new(&args[0]);
    assert!(!model_path.exists());
    assert!(!model_path.parent().unwrap().exists());
    assert_eq!(model.status(), SolutionStatus::Infeasible);
}

#[test]
#[serial]
fn test_keep_files_when_delete_is_false() {
    let fixture = Fixture::new();
    let (mut model, _, _) = production_model();
    let glpk = GlpkSolver::with_config(EngineConfig::new(
        fixture.solution_file_engine("glpsol", 2, GLPK_OPTIMAL),
        FileType::Lp,
    ));

    let options = fixture.options().with_name("plan").with_delete(false);
    glpk.solve(&mut model, &options).unwrap();

    assert!(fixture.work.join("plan.lp").exists());
    assert!(fixture.work.join("plan.sol").exists());
    assert_eq!(
        fixture.args(),
        vec![
            "--lp".to_string(),
            fixture.work.join("plan.lp").display().to_string(),
            "-o".to_string(),
            fixture.work.join("plan.sol").display().to_string(),
        ]
    );
}

#[test]
#[serial]
fn test_glpk_optimal_report() {
    let fixture = Fixture::new();
    let (mut model, x1, x2) = production_model();
    let glpk = GlpkSolver::with_config(EngineConfig::new(
        fixture.solution_file_engine("glpsol", 2, GLPK_OPTIMAL),
        FileType::Lp,
    ));

    glpk.solve(&mut model, &fixture.options().with_file_type(FileType::Mps))
        .unwrap();

    assert_eq!(model.status(), SolutionStatus::Optimal);
    assert_relative_eq!(model.objective_value().unwrap(), 120.0);
    assert_eq!(model.value(x1), Some(30.0));
    assert_eq!(model.value(x2), Some(15.0));
    assert_eq!(fixture.args()[0], "--mps");
    assert!(fixture.recorded_model().starts_with("NAME          model\n"));
    assert!(fixture.work_entries().is_empty());
}

#[test]
#[serial]
fn test_lp_solve_reads_mps_by_default() {
    let fixture = Fixture::new();
    let (mut model, x1, _) = production_model();
    let lp_solve = LpSolveSolver::with_config(EngineConfig::new(
        fixture.stdout_engine("lp_solve", LP_SOLVE_OPTIMAL),
        FileType::Mps,
    ));

    lp_solve.solve(&mut model, &fixture.options()).unwrap();

    let args = fixture.args();
    assert_eq!(args[0], "-mps");
    assert!(args[1].ends_with(".mps"), "{:?}", args);
    assert_eq!(model.status(), SolutionStatus::Optimal);
    assert_eq!(model.value(x1), Some(30.0));
    assert!(fixture.work_entries().is_empty());
}

#[test]
#[serial]
fn test_lp_solve_lp_dialect() {
    let fixture = Fixture::new();
    let (mut model, _, _) = production_model();
    let body = format!(
        "cp \"$1\" '{}/model'\necho 'This problem is infeasible'",
        fixture.record.display()
    );
    let lp_solve = LpSolveSolver::with_config(EngineConfig::new(
        fixture.engine("lp_solve", &body),
        FileType::Mps,
    ));

    lp_solve
        .solve(&mut model, &fixture.options().with_file_type(FileType::Lp))
        .unwrap();

    assert_eq!(model.status(), SolutionStatus::Infeasible);
    assert_eq!(model.objective_value(), None);
    assert!(fixture.recorded_model().contains("max: 3 x1 + 2 x2;"));
}

#[test]
#[serial]
fn test_cbc_extra_arguments_precede_solve() {
    let fixture = Fixture::new();
    let (mut model, _, _) = production_model();
    let config = EngineConfig::new(
        fixture.solution_file_engine("cbc", 1, CBC_INFEASIBLE),
        FileType::Lp,
    )
    .with_extra_args(["-sec", "10"]);
    let cbc = CoinCbcSolver::with_config(config);

    let options = fixture.options().with_extra_args(["-threads", "2"]);
    cbc.solve(&mut model, &options).unwrap();

    let args = fixture.args();
    assert_eq!(args.len(), 8);
    assert!(args[0].ends_with(".lp"), "{:?}", args);
    assert_eq!(&args[1..5], ["-sec", "10", "-threads", "2"]);
    assert_eq!(&args[5..7], ["-solve", "-solution"]);
    assert!(args[7].ends_with(".sol"), "{:?}", args);
    assert_eq!(model.status(), SolutionStatus::Infeasible);
}

#[test]
#[serial]
fn test_cplex_extra_commands_precede_optimize() {
    let fixture = Fixture::new();
    let (mut model, _, _) = production_model();
    let cplex = CplexSolver::with_config(EngineConfig::new(
        fixture.stdout_engine("cplex", CPLEX_PRESOLVE_INFEASIBLE),
        FileType::Lp,
    ));

    let options = fixture.options().with_extra_args(["set timelimit 10"]);
    cplex.solve(&mut model, &options).unwrap();

    let args = fixture.args();
    assert_eq!(args.len(), 5);
    assert_eq!(args[0], "-c");
    assert_eq!(&args[2..], ["set timelimit 10", "optimize", "display solution variables -"]);
}

#[test]
#[serial]
fn test_stale_report_from_kept_run_is_not_read() {
    let fixture = Fixture::new();
    let (mut model, x1, _) = production_model();
    let stale = fixture.work.join("plan.sol");
    fs::write(&stale, "Optimal - objective value 5\n      0 x1   7   0\n").unwrap();

    let cbc = CoinCbcSolver::with_config(EngineConfig::new(fixture.engine("cbc", "exit 1"), FileType::Lp));
    let options = fixture.options().with_name("plan").with_delete(false);
    cbc.solve(&mut model, &options).unwrap();

    assert!(fixture.engine_ran());
    assert!(!stale.exists());
    assert_eq!(model.status(), SolutionStatus::Undefined);
    assert_eq!(model.objective_value(), None);
    assert_eq!(model.value(x1), None);
}

#[test]
#[serial]
fn test_cplex_rejects_directory_with_whitespace() {
    let fixture = Fixture::new();
    let (mut model, _, _) = production_model();
    let spaced = fixture.work.join("my runs");
    let cplex = CplexSolver::with_config(EngineConfig::new(
        fixture.stdout_engine("cplex", CPLEX_PRESOLVE_INFEASIBLE),
        FileType::Lp,
    ));

    let err = cplex
        .solve(&mut model, &SolveOptions::new().with_directory(&spaced).with_name("plan"))
        .unwrap_err();

    assert!(matches!(err, SolverError::WorkingDirectory { .. }), "{}", err);
    assert!(!fixture.engine_ran());
    assert!(!spaced.join("plan.lp").exists());
    assert_eq!(model.status(), SolutionStatus::Undefined);
}

#[test]
#[serial]
fn test_missing_engine_leaves_model_and_directory_untouched() {
    let fixture = Fixture::new();
    let (mut model, x1, _) = production_model();
    model.apply_solution(
        Solution::new(SolutionStatus::Optimal, "earlier")
            .with_objective(Some(1.0))
            .with_values(vec![Some(3.0), Some(4.0)]),
    );

    let cbc = CoinCbcSolver::with_config(EngineConfig::new(fixture.bin.join("no-such-cbc"), FileType::Lp));
    let err = cbc.solve(&mut model, &fixture.options()).unwrap_err();

    assert!(matches!(err, SolverError::SolverNotAvailable { .. }), "{}", err);
    assert!(err.is_environment());
    assert_eq!(model.status(), SolutionStatus::Optimal);
    assert_eq!(model.objective_value(), Some(1.0));
    assert_eq!(model.value(x1), Some(3.0));
    assert!(fixture.work_entries().is_empty());
}

#[test]
#[serial]
fn test_non_executable_engine_is_not_available() {
    let fixture = Fixture::new();
    let (mut model, _, _) = production_model();
    let path = fixture.bin.join("cplex");
    fs::write(&path, "#!/bin/sh\n").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

    let cplex = CplexSolver::with_config(EngineConfig::new(&path, FileType::Lp));
    let err = cplex.solve(&mut model, &fixture.options()).unwrap_err();

    assert_eq!(err.code(), "SOLVER_NOT_AVAILABLE");
    assert!(fixture.work_entries().is_empty());
}

#[test]
#[serial]
fn test_silent_engines_give_undefined() {
    let fixture = Fixture::new();
    let (mut model, x1, _) = production_model();

    let cplex = CplexSolver::with_config(EngineConfig::new(fixture.engine("cplex", "exit 0"), FileType::Lp));
    cplex.solve(&mut model, &fixture.options()).unwrap();
    assert_eq!(model.status(), SolutionStatus::Undefined);
    assert_eq!(model.value(x1), None);

    // No result file at all.
    let cbc = CoinCbcSolver::with_config(EngineConfig::new(fixture.engine("cbc", "exit 0"), FileType::Lp));
    cbc.solve(&mut model, &fixture.options()).unwrap();
    assert_eq!(model.status(), SolutionStatus::Undefined);
    assert!(fixture.work_entries().is_empty());
}

#[test]
#[serial]
fn test_failure_exit_code_is_advisory() {
    let fixture = Fixture::new();
    let (mut model, _, x2) = production_model();
    let body = format!("cat <<'REPORT'\n{}\nREPORT\nexit 3", LP_SOLVE_OPTIMAL);
    let lp_solve = LpSolveSolver::with_config(EngineConfig::new(fixture.engine("lp_solve", &body), FileType::Mps));

    lp_solve.solve(&mut model, &fixture.options()).unwrap();

    assert_eq!(model.status(), SolutionStatus::Optimal);
    assert_eq!(model.value(x2), Some(15.0));
}

#[test]
#[serial]
fn test_unrepresentable_model_fails_before_spawn() {
    let fixture = Fixture::new();
    let mut model = Model::new();
    let x = model.add_variable(Variable::named("throughput")).unwrap();
    model.minimize(LinearExpression::new().term(x, 1.0)).unwrap();

    let lp_solve = LpSolveSolver::with_config(EngineConfig::new(
        fixture.stdout_engine("lp_solve", LP_SOLVE_OPTIMAL),
        FileType::Mps,
    ));
    let err = lp_solve.solve(&mut model, &fixture.options()).unwrap_err();

    assert!(matches!(err, SolverError::Format { format: "MPS", .. }), "{}", err);
    assert!(!err.is_environment());
    assert!(!fixture.engine_ran());
    assert_eq!(model.status(), SolutionStatus::Undefined);
    assert!(fixture.work_entries().is_empty());
}

#[test]
#[serial]
fn test_factory_solver_behind_trait_object() {
    let fixture = Fixture::new();
    let (mut model, x1, _) = production_model();
    let config = EngineConfig::new(fixture.solution_file_engine("glpsol", 2, GLPK_OPTIMAL), FileType::Lp);
    let solver: std::sync::Arc<dyn SolverService> =
        SolverFactory::create_with_config(SolverBackend::Glpk, config);

    solver.solve(&mut model, &fixture.options()).unwrap();

    assert_eq!(solver.name(), "GLPK");
    assert_eq!(model.status(), SolutionStatus::Optimal);
    assert_eq!(model.value(x1), Some(30.0));
}
