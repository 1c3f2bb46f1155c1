// cccp: compile a source file to C, build it, run it

use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use cccp::config::Config;
use cccp::parser::lexer::Lexer;
use cccp::pipeline::{compile, CompileError};
use cccp::toolchain::Toolchain;

fn init_logging(config: &Config) {
    let filter = if config.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("CCCP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn usage(program_name: &str) {
    eprintln!("Usage: {} <file>", program_name);
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CCCP_OUTPUT_DIR  directory for output.c and the executable (default: output)");
    eprintln!("  CC               C compiler to use");
    eprintln!("  CCCP_EMIT_ONLY   print the generated C instead of running it");
    eprintln!("  CCCP_LOG         log filter, e.g. debug or cccp=trace");
    eprintln!("  CCCP_DEBUG       verbose logging with token and AST dumps");
}

fn main() -> Result<ExitCode> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("cccp");

    if args.len() != 2 {
        usage(program_name);
        return Ok(ExitCode::from(2));
    }
    let path = &args[1];

    let config = Config::from_env();
    init_logging(&config);

    let source = fs::read_to_string(path).with_context(|| format!("reading {}", path))?;

    if config.debug {
        for token in Lexer::new(&source) {
            tracing::debug!(location = %token.location, "token {}", token);
        }
    }

    let c_source = match compile(&source) {
        Ok(code) => code,
        Err(CompileError::Syntax(diagnostics)) => {
            eprintln!("Parser errors in {}:", path);
            for err in diagnostics.iter() {
                eprintln!("\t{}", err);
            }
            return Ok(ExitCode::from(1));
        }
        Err(CompileError::Codegen(err)) => {
            eprintln!("Error in {}: {}", path, err);
            let location = err.location();
            if let Some(line) = source.lines().nth(location.line.saturating_sub(1)) {
                eprintln!("  {}", line);
                eprintln!("  {}^", " ".repeat(location.column.saturating_sub(1)));
            }
            return Ok(ExitCode::from(1));
        }
    };

    if config.emit_only {
        print!("{}", c_source);
        return Ok(ExitCode::SUCCESS);
    }

    let toolchain = Toolchain::detect(config.compiler.clone(), &config.output_dir)?;
    let stdout = toolchain.compile_and_run(&c_source).with_context(|| {
        format!(
            "building {} with {} in {}",
            path,
            toolchain.compiler().display(),
            toolchain.work_dir().display()
        )
    })?;
    print!("{}", stdout);

    Ok(ExitCode::SUCCESS)
}
