//! Annotate a tab separated file of PrSMs with their five-level proteoform classification

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
};

use clap::Parser;
use context_error::{BasicKind, BoxedError, Context, CreateError};
use proteoform::classification::raw_level_flags;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// The command line interface arguments
#[derive(Debug, Parser)]
struct Cli {
    /// The input file, tab separated with the gene and sequence columns
    #[arg(short, long)]
    in_path: String,
    /// The output path for the annotated tab separated file
    #[arg(short, long)]
    out_path: String,
    /// The zero based column index of the gene column
    #[arg(long, default_value_t = 0)]
    gene_column: usize,
    /// The zero based column index of the sequence column
    #[arg(long, default_value_t = 1)]
    sequence_column: usize,
    /// Set if the first line of the file is a header line
    #[arg(long)]
    header: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let args = Cli::parse();
    let in_file = BufReader::new(File::open(&args.in_path).expect("Could not open input file"));
    let mut out_file =
        BufWriter::new(File::create(&args.out_path).expect("Could not create output file"));
    let errors = annotate_file(&args, in_file, &mut out_file);

    if errors.is_empty() {
        println!("No errors, enjoy the new file!");
    } else {
        for e in &errors {
            println!("{e}");
        }
        println!(
            "Errors were found while reading the PrSM file. Output is still generated but all above lines are ignored."
        );
    }
}

/// Classify all lines of the input, blank lines and `#` comments are skipped, the first other line
/// is the header if requested. Gives back all errors for lines that could not be classified.
fn annotate_file(
    args: &Cli,
    input: impl BufRead,
    output: &mut impl Write,
) -> Vec<BoxedError<'static, BasicKind>> {
    let mut errors = Vec::new();
    let mut rows = 0_usize;
    let mut expect_header = args.header;

    for (line_index, line) in input.lines().enumerate() {
        let line = line.expect("Could not read line from input file");
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        if expect_header {
            expect_header = false;
            writeln!(
                output,
                "{line}\tlocalized\tidentified\tsequence_known\tgene_known\tlevel"
            )
            .unwrap();
            continue;
        }
        match annotate(args, &line, line_index) {
            Ok(annotated) => {
                writeln!(output, "{annotated}").unwrap();
                rows += 1;
            }
            Err(error) => context_error::combine_error(&mut errors, error, ()),
        }
    }
    tracing::info!(rows, errors = errors.len(), "Classified PrSMs");
    errors
}

/// Classify a single line and give back the line with the classification columns appended
fn annotate(
    args: &Cli,
    line: &str,
    line_index: usize,
) -> Result<String, BoxedError<'static, BasicKind>> {
    let columns = line.split('\t').collect::<Vec<_>>();
    let column = |index: usize, name: &str| {
        columns.get(index).copied().ok_or_else(|| {
            BoxedError::new(
                BasicKind::Error,
                "Missing column",
                format!("This line has no {name} column, expected it at column index {index}"),
                Context::default()
                    .source(args.in_path.clone())
                    .line_index(line_index as u32)
                    .lines(0, line)
                    .to_owned(),
            )
        })
    };
    let gene = column(args.gene_column, "gene")?;
    let sequence = column(args.sequence_column, "sequence")?;
    let flags = raw_level_flags(gene, sequence);
    tracing::debug!(gene, sequence, level = %flags.level(), "Classified");
    Ok(format!(
        "{line}\t{}\t{}\t{}\t{}\t{}",
        flags.localized,
        flags.identified,
        flags.sequence_known,
        flags.gene_known,
        flags.level()
    ))
}
