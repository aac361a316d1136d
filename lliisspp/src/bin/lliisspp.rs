use std::fs::read_to_string;
use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use json::{stringify_pretty, JsonValue};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use lliisspp::{eval_line, eval_program, parse, EnvRef, Environment, Value};

#[derive(Parser)]
#[command(version, about = "An interpreter for a small Lisp")]
struct Cli {
    /// Evaluate this code instead of starting the prompt
    #[arg(short = 'c', long)]
    code: Option<String>,

    /// Print the syntax tree as JSON instead of evaluating
    #[arg(long)]
    ast: bool,

    /// Evaluate this file instead of starting the prompt
    path: Option<PathBuf>,
}

fn print_ast(input: &str) -> Result<(), String> {
    let tree = parse(input).map_err(|err| err.to_string())?;
    println!("{}", stringify_pretty(JsonValue::from(&tree), 4));
    Ok(())
}

fn repl(env: &EnvRef, ast: bool) -> rustyline::Result<()> {
    let mut editor = DefaultEditor::new()?;

    println!("lliisspp version {}", env!("CARGO_PKG_VERSION"));
    println!("Press Ctrl+C to Exit\n");

    loop {
        match editor.readline("lliisspp> ") {
            Ok(line) => {
                editor.add_history_entry(line.as_str())?;
                if ast {
                    if let Err(err) = print_ast(&line) {
                        eprintln!("{}", err);
                    }
                    continue;
                }
                match eval_line(env, &line) {
                    Ok(value) => println!("{}", value),
                    Err(err) => eprintln!("{}", err),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(()),
            Err(err) => return Err(err),
        }
    }
}

fn main() {
    lliisspp::init_tracing();
    let args = Cli::parse();
    let env = Environment::global_with_builtins();

    let input = if let Some(path) = args.path {
        match read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) => {
                eprintln!("Error: {}: {}", path.display(), err);
                exit(1);
            }
        }
    } else if let Some(code) = args.code {
        code
    } else {
        if let Err(err) = repl(&env, args.ast) {
            eprintln!("Error: {}", err);
            exit(1);
        }
        return;
    };

    if args.ast {
        if let Err(err) = print_ast(&input) {
            eprintln!("{}", err);
            exit(1);
        }
        return;
    }

    match eval_program(&env, &input) {
        Ok(Value::Error(err)) => {
            eprintln!("Error: {}", err);
            exit(1);
        }
        Ok(value) => println!("{}", value),
        Err(err) => {
            eprintln!("{}", err);
            exit(1);
        }
    }
}
