use clap::Parser;

#[derive(Parser, Debug, Clone)]
/// Normalize LTL formulas: no strong until below weak operators, fairness only at the top
pub struct Args {
    /// formula to normalize, may be repeated; formulas are read line by line
    /// from the input file or stdin when absent
    #[arg(short, long)]
    pub formula: Vec<String>,

    /// input file, one formula per line
    #[arg(short = 'i', long, default_value_t)]
    pub file: String,

    /// take formulas as written instead of converting them to negation normal form
    #[arg(long, default_value_t = false)]
    pub raw: bool,

    /// reject formulas outside negation normal form instead of reading the
    /// offending part as true
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// report results that are not in normal form and fail
    #[arg(short, long, default_value_t = false)]
    pub check: bool,

    /// print the size of each formula before and after
    #[arg(short, long, default_value_t = false)]
    pub stats: bool,

    /// deepest formula accepted, counted on the text before parsing: the
    /// operators of each parenthesis level plus one per parenthesis
    #[arg(long, default_value_t = 4096)]
    pub max_depth: usize,

    /// verbose
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
