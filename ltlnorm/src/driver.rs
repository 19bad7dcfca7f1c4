use crate::command::Args;
use ltlnorm::{
    export::to_expr,
    ingest::{from_expr, try_from_expr},
    metrics, normalize, Formula, IngestError,
};
use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
};
use thiserror::Error;
use tracing::{debug, error, warn};

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Parse(#[from] ltl::ParseError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("formula is {depth} levels deep, at most {limit} are accepted")]
    TooDeep { depth: usize, limit: usize },

    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sizes {
    pub nodes: usize,
    pub dag: usize,
}

impl Sizes {
    fn of(formula: &Formula) -> Self {
        Self {
            nodes: metrics::node_count(formula),
            dag: metrics::dag_size(formula),
        }
    }
}

#[derive(Debug)]
pub struct Outcome {
    pub text: String,
    pub normalized: bool,
    pub before: Sizes,
    pub after: Sizes,
}

/// Parse, ingest and normalize one formula. Input nested deeper than
/// `--max-depth` is turned down before any recursive step.
pub fn normalize_text(text: &str, args: &Args) -> Result<Outcome, DriverError> {
    let depth = ltl::nesting_depth(text)?;
    if depth > args.max_depth {
        return Err(DriverError::TooDeep {
            depth,
            limit: args.max_depth,
        });
    }
    let mut expr = ltl::parse(text)?;
    if !args.raw {
        expr = expr.negation_normal_form();
    }
    let input = if args.strict {
        try_from_expr(&expr)?
    } else {
        from_expr(&expr)
    };
    let before = Sizes::of(&input);
    let output = normalize(input);
    Ok(Outcome {
        text: to_expr(&output).to_string(),
        normalized: metrics::is_normalized(&output),
        before,
        after: Sizes::of(&output),
    })
}

/// Normalize one line. Returns false only for a result that fails `--check`.
fn process<W: Write>(text: &str, args: &Args, out: &mut W) -> Result<bool, DriverError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(true);
    }
    debug!(formula = text, "read");
    let outcome = match normalize_text(text, args) {
        Ok(outcome) => outcome,
        Err(DriverError::Io(err)) => return Err(DriverError::Io(err)),
        Err(err) => {
            error!(formula = text, "{}", err);
            return Ok(true);
        }
    };
    writeln!(out, "{}", outcome.text)?;
    if args.stats {
        writeln!(
            out,
            "size {} -> {}, dag {} -> {}",
            outcome.before.nodes, outcome.after.nodes, outcome.before.dag, outcome.after.dag
        )?;
    }
    if args.check && !outcome.normalized {
        warn!(formula = %outcome.text, "result is not in normal form");
        return Ok(false);
    }
    Ok(true)
}

pub fn run_lines<R: BufRead, W: Write>(
    reader: R,
    args: &Args,
    out: &mut W,
) -> Result<bool, DriverError> {
    let mut all_normal = true;
    for line in reader.lines() {
        all_normal &= process(&line?, args, out)?;
    }
    Ok(all_normal)
}

/// Normalize the formulas given by `args`, printing one result per line.
/// Returns whether every result passed the normal form check.
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<bool, DriverError> {
    if !args.formula.is_empty() {
        let mut all_normal = true;
        for text in &args.formula {
            all_normal &= process(text, args, out)?;
        }
        return Ok(all_normal);
    }
    if args.file.is_empty() {
        run_lines(io::stdin().lock(), args, out)
    } else {
        run_lines(BufReader::new(File::open(&args.file)?), args, out)
    }
}
