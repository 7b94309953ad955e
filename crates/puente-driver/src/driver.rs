//! The solve lifecycle driver.

use std::cell::{Cell, RefCell};
use std::io::Write;
use std::rc::Rc;
use std::time::Instant;

use puente_core::{ModelIo, Problem, Solution};

use crate::error::DriverError;
use crate::format::wrap;
use crate::options::{KeywordOption, OptionError, SolverOption, TypedOption};
use crate::parser::{parse_option_string, ParseFlags, ParseReport};
use crate::registry::OptionRegistry;
use crate::traits::{Solve, SolveContext};

const VERSION_DESC: &str =
    "Single-word phrase:  report version details before solving the problem.";

const WANTSOL_DESC: &str = "What solution information to write.  Sum of\n      \
1 = write <stub>.sol file\n      \
2 = primal values to stdout\n      \
4 = dual values to stdout\n      \
8 = suppress solution message\n";

/// Orchestrates argument processing, option parsing, problem loading, and
/// the solve invocation for one solver.
///
/// The driver owns the problem and the option registry; the numerical
/// engine and the interchange reader/writer are supplied per run.
pub struct Driver {
    name: String,
    long_name: String,
    date: i64,
    options_var_name: String,
    option_header: String,
    registry: OptionRegistry,
    wantsol: Rc<RefCell<i64>>,
    show_version: Rc<Cell<bool>>,
    has_errors: bool,
    read_time: f64,
    stub: Option<String>,
    problem: Problem,
    solution: Option<Solution>,
}

impl Driver {
    /// Create a driver for the named solver.
    ///
    /// `long_name` appears in banners and the solve summary; when empty it
    /// falls back to `name`. `date` is the driver release date in YYYYMMDD
    /// form. The built-in `version` and `wantsol` options are registered
    /// here.
    pub fn new(name: impl Into<String>, long_name: impl Into<String>, date: i64) -> Self {
        let name = name.into();
        let mut long_name = long_name.into();
        if long_name.is_empty() {
            long_name = name.clone();
        }
        let options_var_name = format!("{name}_options");

        let wantsol = Rc::new(RefCell::new(0i64));
        let show_version = Rc::new(Cell::new(false));
        let mut registry = OptionRegistry::new();
        registry.add(Box::new(KeywordOption::with_flag(
            "version",
            VERSION_DESC,
            Rc::clone(&show_version),
        )));
        registry.add(Box::new(TypedOption::with_handle(
            "wantsol",
            WANTSOL_DESC,
            Rc::clone(&wantsol),
        )));

        Self {
            name,
            long_name,
            date,
            options_var_name,
            option_header: String::new(),
            registry,
            wantsol,
            show_version,
            has_errors: false,
            read_time: 0.0,
            stub: None,
            problem: Problem::new(),
            solution: None,
        }
    }

    /// The solver name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The long solver name used in banners.
    pub fn long_name(&self) -> &str {
        &self.long_name
    }

    /// Name of the environment variable parsed for default options.
    pub fn options_var_name(&self) -> &str {
        &self.options_var_name
    }

    /// Set the header printed above the options listing.
    pub fn set_option_header(&mut self, header: impl Into<String>) {
        self.option_header = header.into();
    }

    /// Register a solver-specific option.
    pub fn add_option(&mut self, option: Box<dyn SolverOption>) {
        self.registry.add(option);
    }

    /// Case-sensitive option lookup.
    pub fn get_option(&self, name: &str) -> Result<&dyn SolverOption, OptionError> {
        self.registry.get(name)
    }

    /// The current `wantsol` bit flags.
    pub fn wantsol(&self) -> i64 {
        *self.wantsol.borrow()
    }

    /// The loaded problem.
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// The loaded problem, mutably.
    pub fn problem_mut(&mut self) -> &mut Problem {
        &mut self.problem
    }

    /// The stub resolved by the last argument scan.
    pub fn stub(&self) -> Option<&str> {
        self.stub.as_deref()
    }

    /// The solution produced by the last completed run.
    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    /// Seconds spent loading and parsing during the current run; zero
    /// outside the solve invocation.
    pub fn read_time(&self) -> f64 {
        self.read_time
    }

    /// Run the full lifecycle: resolve the stub, load the problem, parse
    /// options, and invoke the engine.
    ///
    /// Returns 1 when no stub is found, the load fails, or option parsing
    /// accumulated errors; 0 on a completed solve attempt. Solve quality is
    /// reported through the retained solution's status.
    pub fn run<I: ModelIo, E: Solve>(&mut self, io: &I, engine: &mut E, args: &[String]) -> i32 {
        let start = Instant::now();
        if let Err(err) = self.process_args(io, args, ParseFlags::default()) {
            eprintln!("{err}");
            tracing::error!(
                component = "driver",
                operation = "run",
                status = "failure",
                error = %err,
                "Argument processing failed"
            );
            return 1;
        }
        self.read_time = start.elapsed().as_secs_f64();
        let solution = engine.solve(SolveContext {
            problem: &mut self.problem,
            read_time: self.read_time,
        });
        // Cleared on every path out of the solve so a later run never
        // reports this run's read time.
        self.read_time = 0.0;
        tracing::debug!(
            component = "driver",
            operation = "run",
            status = "success",
            solver = %self.name,
            solve_code = solution.solve_code(),
            "Solve attempt completed"
        );
        self.report_solution(io, &solution);
        self.solution = Some(solution);
        0
    }

    /// Resolve the stub from `args`, load the problem, and parse the
    /// remaining tokens as option strings.
    pub fn process_args<I: ModelIo>(
        &mut self,
        io: &I,
        args: &[String],
        flags: ParseFlags,
    ) -> Result<(), DriverError> {
        let mut stub_index = None;
        for (index, arg) in args.iter().enumerate() {
            if arg.starts_with('-') {
                // Driver glue flags (-AMPL and friends) are handled by the
                // invocation layer, not here.
                tracing::debug!(
                    component = "driver",
                    operation = "process_args",
                    flag = %arg,
                    "Ignoring driver flag"
                );
                continue;
            }
            stub_index = Some(index);
            break;
        }
        let Some(stub_index) = stub_index else {
            return Err(DriverError::NoStub);
        };
        let stub = args[stub_index].clone();
        self.problem.read(io, &stub)?;
        self.stub = Some(stub);
        if !self.parse_options(&args[stub_index + 1..], flags) {
            return Err(DriverError::OptionsFailed);
        }
        Ok(())
    }

    /// Parse the environment option string and then each argument in order,
    /// so command tokens override environment defaults.
    ///
    /// A bare `=` argument prints the options listing and exits the process
    /// with code 0 (the documented early-exit path). Returns false when any
    /// string reported errors.
    pub fn parse_options(&mut self, args: &[String], flags: ParseFlags) -> bool {
        self.has_errors = false;
        self.show_version.set(false);
        if let Ok(env_options) = std::env::var(&self.options_var_name) {
            self.parse_string(&env_options, flags);
        }
        for arg in args {
            if arg.trim() == "=" {
                print!("{}", self.render_options_listing());
                let _ = std::io::stdout().flush();
                std::process::exit(0);
            }
            self.parse_string(arg, flags);
        }
        if self.show_version.get() {
            println!("{}, driver({})", self.long_name, self.date);
        }
        let _ = std::io::stdout().flush();
        tracing::debug!(
            component = "driver",
            operation = "parse_options",
            status = if self.has_errors { "failure" } else { "success" },
            options = self.registry.len() as u64,
            "Parsed option strings"
        );
        !self.has_errors
    }

    fn parse_string(&mut self, input: &str, flags: ParseFlags) {
        let mut report = ParseReport::new();
        parse_option_string(&self.registry, input, flags, &mut report);
        for line in report.echoes() {
            println!("{line}");
        }
        for error in report.errors() {
            eprintln!("{error}");
        }
        if report.has_errors() {
            self.has_errors = true;
        }
    }

    /// Render the full options listing: wrapped header, `Directives:`, and
    /// each option's name with its wrapped description.
    pub fn render_options_listing(&self) -> String {
        let mut out = String::new();
        if !self.option_header.is_empty() {
            out.push_str(&wrap(&self.option_header, 0));
            out.push('\n');
        }
        out.push_str("Directives:\n");
        for option in self.registry.iter() {
            out.push('\n');
            out.push_str(option.name());
            out.push('\n');
            out.push_str(&wrap(option.description(), 6));
        }
        out
    }

    fn report_solution<I: ModelIo>(&self, io: &I, solution: &Solution) {
        let wantsol = self.wantsol();
        if wantsol & 1 != 0 {
            if let Some(stub) = &self.stub {
                if let Err(err) = io.write_solution(stub, solution) {
                    eprintln!("{err}");
                    tracing::error!(
                        component = "driver",
                        operation = "report_solution",
                        status = "failure",
                        error = %err,
                        "Writing the result file failed"
                    );
                }
            }
        }
        if wantsol & 2 != 0 {
            for value in solution.values() {
                println!("{value}");
            }
        }
        if wantsol & 4 != 0 {
            for value in solution.dual_values() {
                println!("{value}");
            }
        }
        if wantsol & 8 == 0 {
            println!(
                "{}: solve code {} ({})",
                self.long_name,
                solution.solve_code(),
                solution.status()
            );
        }
    }
}
