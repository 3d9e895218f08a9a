use std::collections::BTreeMap;

use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use textplots::Plot;

use quina_analysis::features::Band;
use quina_analysis::frequency::{Combination, GlobalFrequency};
use quina_analysis::inspect::CardReport;
use quina_analysis::scorer::{Classification, MatchReport, ScoredCandidate, Status};
use quina_analysis::summary::Summary;
use quina_data::import::ImportResult;
use quina_data::models::Draw;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn format_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:02}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

fn status_cell(status: Status) -> Cell {
    let color = match status {
        Status::Favorable => Color::Green,
        Status::Unfavorable => Color::Red,
    };
    Cell::new(status.to_string()).fg(color)
}

pub fn display_import_summary(result: &ImportResult) {
    eprintln!(
        "{} tirages chargés ({} lignes, {} doublons, {} erreurs)",
        result.loaded, result.total_records, result.duplicates, result.errors
    );
}

pub fn display_draws(draws: &[Draw]) {
    if draws.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }

    let mut table = new_table(vec!["Concours", "Date", "Dezenas"]);
    for draw in draws {
        table.add_row(vec![
            draw.id.to_string(),
            draw.date.clone().unwrap_or_else(|| "—".to_string()),
            format_numbers(&draw.numbers),
        ]);
    }
    println!("{table}");
}

pub fn display_summary(summary: &Summary) {
    println!("\n== Résumé sur {} tirages ==\n", summary.draws);

    let mut table = new_table(vec!["Faixa", "Numéros", "Moyenne", "Plus fréquent"]);
    for band in Band::ALL {
        let range = band.range();
        let stats = summary.band(band);
        table.add_row(vec![
            band.to_string(),
            format!("{}-{}", range.start(), range.end()),
            format!("{:.2}", stats.mean),
            stats.most_common.to_string(),
        ]);
    }
    println!("{table}");

    let mut table = new_table(vec!["Indicateur", "Valeur"]);
    table.add_row(vec!["Moyenne des dezenas".to_string(), format!("{:.2}", summary.overall_mean)]);
    table.add_row(vec!["Amplitude moyenne".to_string(), format!("{:.2}", summary.amplitude_mean)]);
    table.add_row(vec!["Séquences moyennes".to_string(), format!("{:.2}", summary.consecutive_mean)]);
    table.add_row(vec!["Séquences max".to_string(), summary.consecutive_max.to_string()]);
    table.add_row(vec!["Ligne dominante".to_string(), format!("linha {}", summary.top_row + 1)]);
    table.add_row(vec!["Colonne dominante".to_string(), format!("coluna {}", summary.top_column)]);
    println!("{table}");
}

pub fn display_gap_chart(gaps: &BTreeMap<u8, u32>) {
    println!("\n== Fréquence des écarts ==\n");
    let Some(&max_gap) = gaps.keys().next_back() else {
        println!("  (Pas de données à afficher)");
        return;
    };

    let points: Vec<(f32, f32)> = gaps.iter().map(|(&g, &c)| (g as f32, c as f32)).collect();
    let shape = textplots::Shape::Bars(&points);
    let mut chart = textplots::Chart::new(120, 40, 0.0, max_gap as f32 + 1.0);
    println!("{}", chart.lineplot(&shape));
}

pub fn display_frequency(ranked: &[(u8, u32)], draws: usize) {
    println!("\n== Numéros les plus fréquents ({} tirages) ==\n", draws);

    let mut table = new_table(vec!["Rang", "Numéro", "Sorties", "%"]);
    for (i, &(number, count)) in ranked.iter().enumerate() {
        let pct = if draws > 0 { 100.0 * count as f64 / draws as f64 } else { 0.0 };
        table.add_row(vec![
            (i + 1).to_string(),
            format!("{:02}", number),
            count.to_string(),
            format!("{:.1}", pct),
        ]);
    }
    println!("{table}");
}

pub fn display_combinations(title: &str, combinations: &[Combination]) {
    println!("\n== {} ==\n", title);
    if combinations.is_empty() {
        println!("  (aucune)");
        return;
    }

    let mut table = new_table(vec!["Combinaison", "Sorties"]);
    for combo in combinations {
        table.add_row(vec![format_numbers(&combo.numbers), combo.count.to_string()]);
    }
    println!("{table}");
}

pub fn display_candidates(candidates: &[ScoredCandidate], frequency: &GlobalFrequency) {
    println!("\n== Grilles générées ==\n");

    let mut table = new_table(vec!["#", "Dezenas", "Stratégie", "Fréq. moyenne", "Score", "Statut"]);
    for (i, scored) in candidates.iter().enumerate() {
        let numbers = &scored.candidate.numbers;
        let freq_mean =
            numbers.iter().map(|&n| frequency.count(n) as f64).sum::<f64>() / numbers.len() as f64;
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(format_numbers(numbers)),
            Cell::new(scored.candidate.strategy.to_string()),
            Cell::new(format!("{:.2}", freq_mean)),
            Cell::new(scored.classification.score),
            status_cell(scored.classification.status),
        ]);
    }
    println!("{table}");
}

pub fn display_classification(report: &CardReport, classification: &Classification, similar: &[&Draw]) {
    println!("\n== Grille {} ==\n", format_numbers(&report.numbers));

    let mut table = new_table(vec!["Indicateur", "Valeur"]);
    table.add_row(vec![Cell::new("Score"), Cell::new(classification.score)]);
    table.add_row(vec![Cell::new("Statut"), status_cell(classification.status)]);
    table.add_row(vec![Cell::new("Somme"), Cell::new(report.sum)]);
    table.add_row(vec![
        Cell::new("Pairs / impairs"),
        Cell::new(format!("{} / {}", report.evens, report.odds)),
    ]);
    table.add_row(vec![Cell::new("Fréquence moyenne"), Cell::new(format!("{:.2}", report.frequency_mean))]);
    table.add_row(vec![Cell::new("Quadrants"), Cell::new(format!("{:?}", report.quadrants))]);
    table.add_row(vec![Cell::new("Écarts"), Cell::new(format!("{:?}", report.gaps))]);
    table.add_row(vec![Cell::new("Écarts déjà vus"), Cell::new(format!("{:?}", report.common_gaps))]);
    println!("{table}");

    display_combinations("Paires fréquentes présentes", &report.historical_pairs);
    display_combinations("Trincas fréquentes présentes", &report.historical_triples);

    if !similar.is_empty() {
        println!("\n== Tirages proches ==\n");
        let owned: Vec<Draw> = similar.iter().map(|&d| d.clone()).collect();
        display_draws(&owned);
    }
}

pub fn display_matches(card: &[u8; 5], reports: &[MatchReport]) {
    println!("\n== Vérification de {} ==\n", format_numbers(card));
    if reports.is_empty() {
        println!("Aucun tirage primé pour cette grille.");
        return;
    }

    let mut table = new_table(vec!["Concours", "Acertos", "Faixa de prêmio"]);
    for report in reports {
        table.add_row(vec![
            report.draw_id.to_string(),
            report.hits.to_string(),
            report.tier.map_or_else(|| "—".to_string(), |t| t.to_string()),
        ]);
    }
    println!("{table}");
}
