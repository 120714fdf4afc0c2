//! Benchmark reporting
//!
//! Layer: L8_Benchmark → Reporter
//!
//! Renders benchmark results as Markdown, JSON, CSV or plain text.

use crate::benchmark::BenchmarkResult;
use crate::suite::BenchmarkStatistics;

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    /// Markdown table
    Markdown,
    /// JSON
    Json,
    /// CSV
    Csv,
    /// Plain text summary
    Text,
}

/// Benchmark reporter
pub struct Reporter;

impl Reporter {
    // ========================================================================
    // Format Converters
    // ========================================================================

    /// Generate report in specified format
    pub fn report(results: &[BenchmarkResult], format: ReportFormat) -> String {
        match format {
            ReportFormat::Markdown => Self::to_markdown(results),
            ReportFormat::Json => Self::to_json(results),
            ReportFormat::Csv => Self::to_csv(results),
            ReportFormat::Text => Self::to_text(results),
        }
    }

    /// Convert results to Markdown tables
    pub fn to_markdown(results: &[BenchmarkResult]) -> String {
        let stats = BenchmarkStatistics::from_results(results);
        let mut output = String::from("# EGS Benchmark Results\n\n");

        output.push_str("## Summary\n\n");
        output.push_str(&format!("- **Benchmarks**: {}\n", stats.count));
        output.push_str(&format!(
            "- **Avg Improvement**: {:+.2}%\n",
            stats.avg_gain_percent
        ));
        output.push_str(&format!(
            "- **Max Improvement**: {:+.2}%\n",
            stats.max_gain_percent
        ));
        output.push_str(&format!(
            "- **EGS Win Rate**: {:.1}%\n",
            stats.egs_win_rate * 100.0
        ));
        output.push_str(&format!(
            "- **Avg Depth Reduction**: {:.1}%\n",
            stats.avg_depth_reduction
        ));
        output.push_str(&format!(
            "- **Total Time**: {:.2}s\n\n",
            stats.total_time_ms as f64 / 1000.0
        ));

        output.push_str("## Detailed Results\n\n");
        output.push_str(
            "| Name | Qubits | Layers | Fid Std | Fid EGS | Improve% | Depth Std | Depth EGS | CX Std | CX EGS | Time(ms) |\n",
        );
        output.push_str(
            "|------|--------|--------|---------|---------|----------|-----------|-----------|--------|--------|----------|\n",
        );

        for r in results {
            output.push_str(&format!(
                "| {} | {} | {} | {:.4} | {:.4} | {:+.1}% | {} | {} | {} | {} | {} |\n",
                r.name,
                r.num_qubits,
                r.layers,
                r.fid_std(),
                r.fid_egs(),
                r.gain_percent(),
                r.depth_std(),
                r.depth_egs(),
                r.standard.cx_count,
                r.egs.cx_count,
                r.time_ms
            ));
        }

        output
    }

    /// Convert results to JSON
    pub fn to_json(results: &[BenchmarkResult]) -> String {
        let stats = BenchmarkStatistics::from_results(results);

        let report = serde_json::json!({
            "statistics": stats,
            "results": results,
        });

        serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Convert results to CSV
    pub fn to_csv(results: &[BenchmarkResult]) -> String {
        let mut output = String::from(
            "name,num_qubits,layers,shots,seed,optimization_level,fid_std,fid_egs,gain_percent,depth_std,depth_egs,cx_std,cx_egs,duration_std_ns,duration_egs_ns,time_ms\n",
        );

        for r in results {
            output.push_str(&format!(
                "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}\n",
                r.name,
                r.num_qubits,
                r.layers,
                r.shots,
                r.seed,
                r.optimization_level,
                r.fid_std(),
                r.fid_egs(),
                r.gain_percent(),
                r.depth_std(),
                r.depth_egs(),
                r.standard.cx_count,
                r.egs.cx_count,
                r.standard.duration_ns,
                r.egs.duration_ns,
                r.time_ms
            ));
        }

        output
    }

    /// Convert results to plain text summary
    pub fn to_text(results: &[BenchmarkResult]) -> String {
        let stats = BenchmarkStatistics::from_results(results);
        let mut output = String::from("EGS Benchmark Results\n=====================\n\n");

        output.push_str("Summary:\n");
        output.push_str(&format!("  Benchmarks run: {}\n", stats.count));
        output.push_str(&format!(
            "  Average improvement: {:+.2}%\n",
            stats.avg_gain_percent
        ));
        output.push_str(&format!(
            "  Best improvement: {:+.2}%\n",
            stats.max_gain_percent
        ));
        output.push_str(&format!(
            "  Worst improvement: {:+.2}%\n",
            stats.min_gain_percent
        ));
        output.push_str(&format!(
            "  EGS win rate: {:.1}%\n",
            stats.egs_win_rate * 100.0
        ));
        output.push_str(&format!(
            "  Total time: {:.2}s\n\n",
            stats.total_time_ms as f64 / 1000.0
        ));

        output.push_str("Individual Results:\n");
        for r in results {
            output.push_str(&format!("  {}\n", r));
        }

        output
    }

    // ========================================================================
    // Specialized Reports
    // ========================================================================

    /// Side-by-side fidelity and depth per width
    pub fn scaling_report(results: &[BenchmarkResult]) -> String {
        let mut output = String::from("# EGS Scaling Report\n\n");

        output.push_str("| Qubits | Layers | Fid Std | Fid EGS | Depth Std | Depth EGS | Depth Saved |\n");
        output.push_str("|--------|--------|---------|---------|-----------|-----------|-------------|\n");

        for r in results {
            output.push_str(&format!(
                "| {} | {} | {:.4} | {:.4} | {} | {} | {:.1}% |\n",
                r.num_qubits,
                r.layers,
                r.fid_std(),
                r.fid_egs(),
                r.depth_std(),
                r.depth_egs(),
                r.depth_reduction()
            ));
        }

        output
    }
}

// ============================================================================
// Tests
// ============================================================================
