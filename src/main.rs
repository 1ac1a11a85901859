use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use knapsack_mst::{
    build_mst,
    knapsack::greedy,
    presets::{GraphPreset, KnapsackPreset},
    report, solve_exhaustive, solve_fractional_knapsack, solve_knapsack_01, Graph, Instance, Item,
    MstAlgorithm,
};
use rand::prelude::*;
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::PathBuf,
};
use tracing::{info, warn, Level};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Opt {
    #[command(subcommand)]
    command: Command,

    /// Output file path (overwrites old files), else writes to stdout
    #[arg(short, long, global = true)]
    out: Option<PathBuf>,

    /// Indent the JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Log more (-v info, -vv debug, -vvv trace), always to stderr
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Solve a knapsack instance given as `{ "capacity", "items": [{ "id", "profit", "weight" }] }`
    Knapsack {
        #[arg(value_enum)]
        algorithm: KnapsackAlgorithm,

        /// A path to an instance, else reads from stdin
        #[arg(conflicts_with = "preset")]
        file: Option<PathBuf>,

        /// Use a built-in instance instead of reading one
        #[arg(long, value_enum)]
        preset: Option<KnapsackPreset>,

        /// Refuse to enumerate subsets of more items than this
        #[arg(long, default_value_t = 20)]
        max_exhaustive_items: usize,
    },
    /// Find a minimum spanning tree of a graph given as `{ "vertices", "edges": [{ "u", "v", "weight" }] }`
    Mst {
        #[arg(value_enum)]
        algorithm: MstAlgorithm,

        /// A path to a graph, else reads from stdin
        #[arg(conflicts_with = "preset")]
        file: Option<PathBuf>,

        /// Use a built-in graph instead of reading one
        #[arg(long, value_enum)]
        preset: Option<GraphPreset>,
    },
    /// Generate a random knapsack instance whose capacity is half the total weight
    Generate {
        /// Number of items
        #[arg(long)]
        items: u32,

        #[arg(long)]
        seed: u64,

        /// Item weights are drawn from 1..=max-weight
        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
        max_weight: u64,

        /// Item profits are drawn from 0..=max-profit
        #[arg(long, default_value_t = 100)]
        max_profit: u64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum KnapsackAlgorithm {
    /// Exact 0/1 by dynamic programming
    Dp,
    /// Items may be split
    Fractional,
    /// Brute force over every subset
    Exhaustive,
    /// Whole items by ratio, not always optimal
    Greedy,
    /// Run every strategy and compare them
    Compare,
}

struct Output {
    out: Option<PathBuf>,
    pretty: bool,
}

impl Output {
    fn write<T: Serialize>(&self, value: &T) -> Result<()> {
        let mut writer: Box<dyn Write> = match &self.out {
            Some(path) => Box::new(BufWriter::new(
                File::create(path).with_context(|| format!("creating {}", path.display()))?,
            )),
            None => Box::new(io::stdout().lock()),
        };
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, value)?;
        } else {
            serde_json::to_writer(&mut writer, value)?;
        }
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

fn read_json<T: DeserializeOwned>(file: Option<PathBuf>) -> Result<T> {
    match file {
        Some(path) => {
            let reader =
                BufReader::new(File::open(&path).with_context(|| format!("opening {}", path.display()))?);
            serde_json::from_reader(reader).with_context(|| format!("parsing {}", path.display()))
        }
        None => {
            info!("Reading from stdin");
            let mut bytes = vec![];
            io::stdin().read_to_end(&mut bytes)?;
            serde_json::from_slice(&bytes).context("parsing stdin")
        }
    }
}

fn generate(items: u32, seed: u64, max_weight: u64, max_profit: u64) -> Result<Instance<u64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let items = (1..=items)
        .map(|id| {
            let weight = rng.gen_range(1..=max_weight);
            let profit = rng.gen_range(0..=max_profit);
            Item::new(id, profit, weight)
        })
        .collect::<Vec<_>>();
    let total_weight = match items
        .iter()
        .try_fold(0u64, |total, item| total.checked_add(item.weight))
    {
        Some(total_weight) => total_weight,
        None => bail!(
            "total weight of {} items up to {} overflows, lower --max-weight",
            items.len(),
            max_weight
        ),
    };
    Ok(Instance::new(total_weight / 2, items))
}

fn main() -> Result<()> {
    let opt = Opt::parse();
    let level = match opt.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let output = Output {
        out: opt.out,
        pretty: opt.pretty,
    };

    match opt.command {
        Command::Knapsack {
            algorithm,
            file,
            preset,
            max_exhaustive_items,
        } => {
            let instance: Instance<u64> = match preset {
                Some(preset) => preset.instance(),
                None => read_json(file)?,
            };
            let Instance { capacity, items } = &instance;
            info!(capacity, items = items.len(), ?algorithm, "Solving knapsack");

            if matches!(
                algorithm,
                KnapsackAlgorithm::Exhaustive | KnapsackAlgorithm::Compare
            ) && items.len() > max_exhaustive_items
            {
                bail!(
                    "{} items would take 2^{} subsets to enumerate, above the limit of {} (see --max-exhaustive-items)",
                    items.len(),
                    items.len(),
                    max_exhaustive_items
                );
            }

            match algorithm {
                KnapsackAlgorithm::Dp => output.write(&solve_knapsack_01(*capacity, items)?),
                KnapsackAlgorithm::Fractional => {
                    output.write(&solve_fractional_knapsack(*capacity, items)?)
                }
                KnapsackAlgorithm::Exhaustive => output.write(&solve_exhaustive(*capacity, items)?),
                KnapsackAlgorithm::Greedy => output.write(&greedy::solve(*capacity, items)?),
                KnapsackAlgorithm::Compare => output.write(&report::solve_all(*capacity, items)?),
            }
        }
        Command::Mst {
            algorithm,
            file,
            preset,
        } => {
            let graph: Graph<String> = match preset {
                Some(preset) => preset.graph(),
                None => read_json(file)?,
            };
            info!(
                vertices = graph.vertices.len(),
                edges = graph.edges.len(),
                %algorithm,
                "Building MST"
            );
            let result = build_mst(&graph, algorithm)?;
            if !result.spanning {
                warn!("Graph is disconnected, the result does not span every vertex");
            }
            output.write(&result)
        }
        Command::Generate {
            items,
            seed,
            max_weight,
            max_profit,
        } => output.write(&generate(items, seed, max_weight, max_profit)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_is_well_formed() {
        Opt::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_presets_and_global_flags() {
        let opt = Opt::try_parse_from([
            "knapsack-mst",
            "knapsack",
            "compare",
            "--preset",
            "greedy-counterexample",
            "--pretty",
            "-vv",
        ])
        .unwrap();
        assert!(opt.pretty);
        assert_eq!(opt.verbose, 2);
        match opt.command {
            Command::Knapsack {
                algorithm,
                preset,
                max_exhaustive_items,
                ..
            } => {
                assert_eq!(algorithm, KnapsackAlgorithm::Compare);
                assert_eq!(preset, Some(KnapsackPreset::GreedyCounterexample));
                assert_eq!(max_exhaustive_items, 20);
            }
            command => panic!("unexpected command {:?}", command),
        }

        assert!(Opt::try_parse_from(["knapsack-mst", "mst", "boruvka"]).is_err());
        assert!(Opt::try_parse_from([
            "knapsack-mst",
            "generate",
            "--items",
            "3",
            "--seed",
            "1",
            "--max-weight",
            "0"
        ])
        .is_err());
    }

    #[test]
    fn test_generate_is_seeded_and_valid() {
        let instance = generate(12, 7, 10, 100).unwrap();
        assert_eq!(instance, generate(12, 7, 10, 100).unwrap());
        assert_eq!(instance.items.len(), 12);
        assert!(instance
            .items
            .iter()
            .all(|item| (1..=10).contains(&item.weight) && item.profit <= 100));
        assert_eq!(
            instance.capacity,
            instance.items.iter().map(|item| item.weight).sum::<u64>() / 2
        );
        assert!(solve_knapsack_01(instance.capacity, &instance.items).is_ok());
    }

    #[test]
    fn test_generate_rejects_overflowing_total_weight() {
        assert!(generate(64, 3, u64::MAX, 100).is_err());
    }

    #[test]
    fn test_instance_json_layout() {
        let instance: Instance<u64> = serde_json::from_str(
            r#"{ "capacity": 4, "items": [{ "id": 1, "profit": 4, "weight": 3 }, { "id": 2, "profit": 3, "weight": 2 }] }"#,
        )
        .unwrap();
        assert_eq!(instance, KnapsackPreset::RatioCounterexample.instance());
    }
}
