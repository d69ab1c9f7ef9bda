use clap::{Args, Parser, Subcommand};
use tabled::{builder::Builder, settings::Style, Table, Tabled};

use std::path::{Path, PathBuf};
use std::{io, io::Write};

use crate::canvas::Canvas;
use crate::color::Color;
use crate::interpreter::{Interpreter, Log};
use crate::record::{DrawOp, RecordingCanvas, Tee};
use crate::svg::SvgCanvas;
use crate::{lex, store, validate};

/// Run and check pen drawing programs.
#[derive(Parser)]
#[command(name = "penscript", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand)]
pub enum CliCommand {
    /// Check a program's syntax without drawing anything
    Check { file: PathBuf },
    /// Execute a program and list the drawing operations it produced
    Run {
        file: PathBuf,
        #[command(flatten)]
        options: Options,
    },
    /// Execute commands typed one line at a time
    Repl {
        #[command(flatten)]
        options: Options,
    },
}

#[derive(Args, Clone, Debug)]
pub struct Options {
    /// Also render the drawing as an SVG document at this path
    #[arg(long)]
    pub svg: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 640)]
    pub width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 480)]
    pub height: u32,

    /// Color `clear` erases to
    #[arg(long, default_value = "White", value_parser = parse_color)]
    pub background: Color,

    /// Print every executed command to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            svg: None,
            width: 640,
            height: 480,
            background: Color::WHITE,
            verbose: false,
        }
    }
}

fn parse_color(name: &str) -> Result<Color, String> {
    Color::named(name)
        .map(|(_, c)| c)
        .ok_or_else(|| format!("unknown color name '{name}'"))
}

struct CliLogger {
    verbose: bool,
}

impl Log for CliLogger {
    fn log(&mut self, msg: String) {
        if self.verbose {
            eprintln!("{msg}");
        }
    }
}

#[derive(Tabled)]
struct DrawOpInfo {
    #[tabled(rename = "#")]
    index: usize,
    op: &'static str,
    geometry: String,
    color: String,
    filled: String,
}

impl DrawOpInfo {
    fn new(index: usize, op: &DrawOp) -> Self {
        Self {
            index,
            op: op.name(),
            geometry: op.geometry(),
            color: op.color().to_string(),
            filled: op.filled().map(|f| f.to_string()).unwrap_or_default(),
        }
    }
}

fn ops_table(ops: &[DrawOp], first_index: usize) -> String {
    let rows = ops
        .iter()
        .enumerate()
        .map(|(i, op)| DrawOpInfo::new(first_index + i, op));
    Table::new(rows).with(Style::sharp()).to_string()
}

fn pen_table<C: Canvas, L: Log>(interpreter: &Interpreter<'_, C, L>) -> String {
    let pen = interpreter.pen();

    let mut builder = Builder::default();
    builder.push_record(["position", "color", "fill", "background"]);
    builder.push_record([
        pen.position.to_string(),
        pen.color.to_string(),
        (if pen.fill { "on" } else { "off" }).to_owned(),
        interpreter.background().to_string(),
    ]);

    builder.build().with(Style::sharp()).to_string()
}

fn write_svg(svg: &SvgCanvas, path: &Path) -> Result<(), String> {
    store::save(path, &svg.to_document()).map_err(|e| e.to_string())
}

pub fn dispatch(cli: Cli) -> Result<(), String> {
    match cli.command {
        CliCommand::Check { file } => check(&store::load(&file).map_err(|e| e.to_string())?),
        CliCommand::Run { file, options } => {
            run(&store::load(&file).map_err(|e| e.to_string())?, &options)
        }
        CliCommand::Repl { options } => repl(&options),
    }
}

pub fn check(source: &str) -> Result<(), String> {
    match validate::validate(source) {
        Ok(count) => {
            println!("syntax is correct ({count} commands)");
            Ok(())
        }
        Err(e) => Err(format!("syntax error in command: {}\n{e}", e.line)),
    }
}

pub fn run(source: &str, options: &Options) -> Result<(), String> {
    let mut recording = RecordingCanvas::default();
    let mut svg = SvgCanvas::new(options.width, options.height, options.background);
    let mut canvas = Tee(&mut recording, &mut svg);
    let mut logger = CliLogger {
        verbose: options.verbose,
    };

    let mut interpreter =
        Interpreter::new(&mut canvas, &mut logger).with_background(options.background);
    let result = crate::run_program(source, &mut interpreter);
    let pen = pen_table(&interpreter);

    println!("{}", ops_table(&recording.ops, 1));

    let count = result.map_err(|e| e.to_string())?;

    let mut builder = Builder::default();
    builder.push_record(["lines", "operations"]);
    builder.push_record([count.to_string(), recording.ops.len().to_string()]);

    println!("\n--- summary ---");
    println!("{}", builder.build().with(Style::sharp()));
    println!("{pen}");

    if let Some(path) = &options.svg {
        write_svg(&svg, path)?;
        println!("wrote {}", path.display());
    }

    Ok(())
}

const REPL_HELP: &str = "\
commands are executed as they are entered; meta commands:
  :check            validate the session's accepted commands
  :check <command>  check a command without executing it
  :load <path>      run a program file and append it to the session
  :save <path>      write the session's accepted commands to a file
  :svg <path>       write the current drawing as SVG
  :pen              show the pen state
  :quit             leave";

pub enum Reply {
    Output(String),
    Quit,
}

type SessionCanvas<'b> = Tee<'b, RecordingCanvas, SvgCanvas>;

/// Immediate-mode drawing: one interpreter plus the lines it accepted.
pub struct Session<'a, 'b, L: Log> {
    interpreter: Interpreter<'a, SessionCanvas<'b>, L>,
    accepted: Vec<String>,
}

impl<'a, 'b, L: Log> Session<'a, 'b, L> {
    pub fn new(interpreter: Interpreter<'a, SessionCanvas<'b>, L>) -> Self {
        Self {
            interpreter,
            accepted: vec![],
        }
    }

    pub fn accepted(&self) -> &[String] {
        &self.accepted
    }

    fn text(&self) -> String {
        let mut text = self.accepted.join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        text
    }

    pub fn handle(&mut self, line: &str) -> Reply {
        let line = line.trim();
        if line.is_empty() {
            return Reply::Output(String::new());
        }

        let drawn_before = self.interpreter.canvas().0.ops.len();

        let mut out = match line.strip_prefix(':') {
            Some(meta) => {
                let (name, arg) = meta.split_once(' ').unwrap_or((meta, ""));
                match self.meta(name, arg.trim()) {
                    Some(out) => out,
                    None => return Reply::Quit,
                }
            }
            None => match self.interpreter.process(line) {
                Ok(()) => {
                    self.accepted.push(line.to_owned());
                    String::new()
                }
                Err(e) => format!("error executing command: {e}"),
            },
        };

        let ops = &self.interpreter.canvas().0.ops;
        if ops.len() > drawn_before {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&ops_table(&ops[drawn_before..], drawn_before + 1));
        }

        Reply::Output(out)
    }

    // None means quit
    fn meta(&mut self, name: &str, arg: &str) -> Option<String> {
        let out = match name {
            "q" | "quit" => return None,
            "pen" => pen_table(&self.interpreter),
            "check" if arg.is_empty() => match validate::validate(&self.text()) {
                Ok(count) => format!("syntax is correct ({count} commands)"),
                Err(e) => format!("syntax error in command: {}\n{e}", e.line),
            },
            "check" => match validate::check_line(arg) {
                Ok(()) => "ok".to_owned(),
                Err(e) => format!("syntax error in command: {arg}\n{e}"),
            },
            "save" if !arg.is_empty() => match store::save(arg, &self.text()) {
                Ok(()) => format!("saved {} commands", self.accepted.len()),
                Err(e) => e.to_string(),
            },
            "load" if !arg.is_empty() => match store::load(arg) {
                Ok(text) => self.load(&text),
                Err(e) => e.to_string(),
            },
            "svg" if !arg.is_empty() => {
                match write_svg(&*self.interpreter.canvas().1, Path::new(arg)) {
                    Ok(()) => format!("wrote {arg}"),
                    Err(e) => e,
                }
            }
            _ => REPL_HELP.to_owned(),
        };

        Some(out)
    }

    /// Runs `text`; lines up to the first failure join the session.
    fn load(&mut self, text: &str) -> String {
        let result = crate::run_program(text, &mut self.interpreter);
        let failed_at = result.as_ref().err().map(|e| e.line_number);

        self.accepted.extend(
            lex::split_lines(text)
                .into_iter()
                .filter(|l| failed_at.map_or(true, |n| l.number < n))
                .map(|l| l.text.to_owned()),
        );

        match result {
            Ok(count) => format!("ran {count} commands"),
            Err(e) => e.to_string(),
        }
    }
}

pub fn repl(options: &Options) -> Result<(), String> {
    let mut recording = RecordingCanvas::default();
    let mut svg = SvgCanvas::new(options.width, options.height, options.background);
    let mut canvas = Tee(&mut recording, &mut svg);
    let mut logger = CliLogger {
        verbose: options.verbose,
    };

    let interpreter =
        Interpreter::new(&mut canvas, &mut logger).with_background(options.background);
    let mut session = Session::new(interpreter);

    println!("{REPL_HELP}");

    loop {
        print!(">>> ");
        let _ = io::stdout().flush();

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => (),
            Err(e) => return Err(format!("error reading input: {e}")),
        }

        match session.handle(&input) {
            Reply::Output(out) if out.is_empty() => (),
            Reply::Output(out) => println!("{out}"),
            Reply::Quit => break,
        }
    }

    Ok(())
}
