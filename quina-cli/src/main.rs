mod display;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quina_analysis::config::{GeneratorConfig, Strategy, load_config};
use quina_analysis::generator::{best_of_random, generate};
use quina_analysis::inspect::{CardReport, similar_draws};
use quina_analysis::scorer::{Classification, MatchReport, check, check_history, score_candidates};
use quina_analysis::window::WindowAnalysis;
use quina_data::import::import_csv;
use quina_data::models::{Draw, validate_numbers};
use quina_data::repository::{DrawRepository, MemoryRepository, WindowCache};

use crate::display::{
    display_candidates, display_classification, display_combinations, display_draws,
    display_frequency, display_gap_chart, display_import_summary, display_matches,
    display_summary,
};

/// Numéros communs à partir desquels un tirage est jugé proche d'une grille.
const SIMILAR_MIN_SHARED: u8 = 4;

#[derive(Parser)]
#[command(name = "quina", about = "Analyse de motifs et classement de grilles Quina")]
struct Cli {
    /// Historique des tirages (CSV `;`)
    #[arg(short, long, global = true, default_value = "assets/quina.csv")]
    file: PathBuf,

    /// Configuration JSON du générateur
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Sortie JSON au lieu des tableaux
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Lister les derniers tirages
    List {
        /// Nombre de tirages à afficher
        #[arg(short, long, default_value = "10")]
        last: usize,
    },

    /// Résumé de la fenêtre (faixas, moyennes, ligne et colonne dominantes)
    Stats {
        /// Fenêtre d'analyse (0 = tout l'historique)
        #[arg(short, long, default_value = "100")]
        window: usize,
    },

    /// Fréquences des numéros, paires et trincas
    Frequency {
        /// Fenêtre d'analyse (0 = tout l'historique)
        #[arg(short, long, default_value = "100")]
        window: usize,

        /// Nombre d'entrées par classement
        #[arg(short, long, default_value = "10")]
        top: usize,
    },

    /// Générer et classer des grilles
    Generate {
        /// Stratégie de génération
        #[arg(short, long)]
        strategy: Option<Strategy>,

        /// Nombre de grilles
        #[arg(short, long)]
        count: Option<usize>,

        /// Taille du pool de la stratégie par fréquence
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,

        /// Fenêtre d'analyse (0 = tout l'historique)
        #[arg(short, long, default_value = "100")]
        window: usize,
    },

    /// Classer une grille face à la fenêtre
    Classify {
        /// 5 dezenas entre 1 et 80
        #[arg(num_args = 5, required = true)]
        numbers: Vec<u8>,

        /// Fenêtre d'analyse (0 = tout l'historique)
        #[arg(short, long, default_value = "100")]
        window: usize,
    },

    /// Conférer une grille contre un concours ou tout l'historique
    Check {
        /// 5 dezenas entre 1 et 80
        #[arg(num_args = 5, required = true)]
        numbers: Vec<u8>,

        /// Concours à vérifier (par défaut : tout l'historique)
        #[arg(short, long)]
        draw: Option<u32>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut cache = load_history(&cli.file, cli.json)?;

    match cli.command {
        Command::List { last } => cmd_list(&mut cache, last, cli.json),
        Command::Stats { window } => cmd_stats(&mut cache, window, cli.json),
        Command::Frequency { window, top } => cmd_frequency(&mut cache, window, top, cli.json),
        Command::Generate {
            strategy,
            count,
            top_k,
            seed,
            window,
        } => {
            let mut config = match &cli.config {
                Some(path) => load_config(path)
                    .with_context(|| format!("Configuration illisible: {:?}", path))?,
                None => GeneratorConfig::default(),
            };
            if let Some(strategy) = strategy {
                config.strategy = strategy;
            }
            if let Some(count) = count {
                config.count = count;
            }
            if let Some(top_k) = top_k {
                config.top_k = top_k;
            }
            cmd_generate(&mut cache, &config, seed, window, cli.json)
        }
        Command::Classify { numbers, window } => cmd_classify(&mut cache, &numbers, window, cli.json),
        Command::Check { numbers, draw } => cmd_check(&mut cache, &numbers, draw, cli.json),
    }
}

fn load_history(path: &Path, quiet: bool) -> Result<WindowCache<MemoryRepository>> {
    let (repo, result) = import_csv(path)?;
    info!(loaded = result.loaded, errors = result.errors, "historique importé");
    if !quiet {
        display_import_summary(&result);
    }
    if repo.is_empty() {
        bail!("Aucun tirage valide dans {:?}", path);
    }
    Ok(WindowCache::new(repo))
}

fn window_size(window: usize) -> Option<usize> {
    (window > 0).then_some(window)
}

fn analyze(cache: &mut WindowCache<MemoryRepository>, window: usize) -> Result<WindowAnalysis> {
    let draws = cache.window(window_size(window))?;
    Ok(WindowAnalysis::compute(draws, quina_analysis::window::DEFAULT_TOP_COMBINATIONS)?)
}

fn parse_card(numbers: &[u8]) -> Result<[u8; 5]> {
    validate_numbers(0, numbers).context("Grille invalide")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_list(cache: &mut WindowCache<MemoryRepository>, last: usize, json: bool) -> Result<()> {
    let draws = cache.window(Some(last))?;
    if json {
        return print_json(&draws);
    }
    let mut recent = draws.to_vec();
    recent.reverse();
    display_draws(&recent);
    Ok(())
}

#[derive(Serialize)]
struct StatsOutput<'a> {
    summary: &'a quina_analysis::summary::Summary,
    gaps: &'a std::collections::BTreeMap<u8, u32>,
}

fn cmd_stats(cache: &mut WindowCache<MemoryRepository>, window: usize, json: bool) -> Result<()> {
    let analysis = analyze(cache, window)?;
    if json {
        return print_json(&StatsOutput { summary: &analysis.summary, gaps: &analysis.gaps });
    }
    display_summary(&analysis.summary);
    display_gap_chart(&analysis.gaps);
    Ok(())
}

#[derive(Serialize)]
struct FrequencyOutput<'a> {
    numbers: Vec<(u8, u32)>,
    pairs: &'a [quina_analysis::frequency::Combination],
    triples: &'a [quina_analysis::frequency::Combination],
}

fn cmd_frequency(
    cache: &mut WindowCache<MemoryRepository>,
    window: usize,
    top: usize,
    json: bool,
) -> Result<()> {
    let draws = cache.window(window_size(window))?;
    let analysis = WindowAnalysis::compute(draws, top)?;
    let ranked: Vec<(u8, u32)> = analysis.frequency.ranked().into_iter().take(top).collect();

    if json {
        return print_json(&FrequencyOutput {
            numbers: ranked,
            pairs: &analysis.pairs,
            triples: &analysis.triples,
        });
    }
    display_frequency(&ranked, analysis.summary.draws);
    display_combinations("Paires les plus fréquentes", &analysis.pairs);
    display_combinations("Trincas les plus fréquentes", &analysis.triples);
    Ok(())
}

fn cmd_generate(
    cache: &mut WindowCache<MemoryRepository>,
    config: &GeneratorConfig,
    seed: Option<u64>,
    window: usize,
    json: bool,
) -> Result<()> {
    config.validate()?;
    let analysis = analyze(cache, window)?;

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let scored = match config.strategy {
        Strategy::Random => best_of_random(&analysis.summary, config.attempts, config.count, &mut rng),
        _ => {
            let candidates = generate(&analysis.summary, &analysis.frequency, config, &mut rng)?;
            score_candidates(candidates, &analysis.summary)
        }
    };

    if json {
        return print_json(&scored);
    }
    if scored.is_empty() {
        println!("Aucune grille favorable sur {} tentatives.", config.attempts);
        return Ok(());
    }
    display_candidates(&scored, &analysis.frequency);
    Ok(())
}

#[derive(Serialize)]
struct ClassifyOutput<'a> {
    classification: Classification,
    report: CardReport,
    similar: Vec<&'a Draw>,
}

fn cmd_classify(
    cache: &mut WindowCache<MemoryRepository>,
    numbers: &[u8],
    window: usize,
    json: bool,
) -> Result<()> {
    let card = parse_card(numbers)?;
    let draws = cache.window(window_size(window))?;
    let analysis = WindowAnalysis::compute(draws, quina_analysis::window::DEFAULT_TOP_COMBINATIONS)?;

    let classification = analysis.classify(&card);
    let report = analysis.inspect(&card);
    let similar = similar_draws(&card, draws, SIMILAR_MIN_SHARED);

    if json {
        return print_json(&ClassifyOutput { classification, report, similar });
    }
    display_classification(&report, &classification, &similar);
    Ok(())
}

fn cmd_check(
    cache: &mut WindowCache<MemoryRepository>,
    numbers: &[u8],
    draw: Option<u32>,
    json: bool,
) -> Result<()> {
    let card = parse_card(numbers)?;

    let reports: Vec<MatchReport> = match draw {
        Some(id) => {
            let Some(target) = cache.repository().find(id)? else {
                bail!("Concours {} introuvable", id);
            };
            vec![check(&card, &target)]
        }
        None => check_history(&card, cache.window(None)?),
    };

    if json {
        return print_json(&reports);
    }
    display_matches(&card, &reports);
    Ok(())
}
