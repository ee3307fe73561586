use crate::analysis::{
    CorrelationMatrix, DatasetSummary, Histogram, MissingTable, QualityFlags, TopCategories,
};

use super::ReportConfig;
use super::tables::{MISSING_MATRIX_FILE, TOP_CATEGORIES_DIR};

pub(crate) const REPORT_FILE: &str = "report.md";

/// Everything the Markdown report draws from.
pub(crate) struct ReportView<'a> {
    pub config: &'a ReportConfig,
    pub source_name: &'a str,
    pub summary: &'a DatasetSummary,
    pub missing: &'a MissingTable,
    pub correlation: &'a CorrelationMatrix,
    pub top: &'a TopCategories,
    pub histograms: &'a [Histogram],
    pub quality: &'a QualityFlags,
    pub problematic_columns: &'a [String],
}

fn pct(share: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, share * 100.0)
}

pub(crate) fn render(view: &ReportView<'_>) -> String {
    let config = view.config;
    let q = view.quality;
    let mut out = String::new();

    out.push_str(&format!("# {}\n\n", config.title));
    out.push_str(&format!("Source file: `{}`\n\n", view.source_name));
    out.push_str(&format!(
        "Rows: **{}**, columns: **{}**\n\n",
        view.summary.n_rows, view.summary.n_cols
    ));

    out.push_str("## Report parameters\n\n");
    out.push_str(&format!("- Max histograms: **{}**\n", config.max_hist_columns));
    out.push_str(&format!("- Top-K categories: **{}**\n", config.top_k_categories));
    out.push_str(&format!(
        "- Problematic missing-share threshold: **{}**\n\n",
        pct(config.min_missing_share, 1)
    ));

    out.push_str("## Data quality (heuristics)\n\n");
    out.push_str(&format!("- Quality score: **{:.2}**\n", q.quality_score));
    out.push_str(&format!(
        "- Max missing share per column: **{}**\n",
        pct(q.max_missing_share, 2)
    ));
    out.push_str(&format!("- Too few rows: **{}**\n", q.too_few_rows));
    out.push_str(&format!("- Too many columns: **{}**\n", q.too_many_columns));
    out.push_str(&format!("- Too many missing values: **{}**\n", q.too_many_missing));
    if q.has_constant_columns {
        out.push_str(&format!(
            "- Constant columns ({}): **{}**\n",
            q.constant_columns_count,
            q.constant_columns_list.join(", ")
        ));
    }
    if q.has_suspicious_id_duplicates {
        out.push_str("- Duplicates in ID columns:\n");
        for item in &q.id_columns_with_duplicates {
            out.push_str(&format!(
                "  - `{}`: {} duplicates\n",
                item.column, item.duplicates
            ));
        }
    }
    out.push('\n');

    out.push_str("## Columns\n\n");
    out.push_str("See `summary.csv`.\n\n");

    out.push_str("## Missing values\n\n");
    if view.missing.is_empty() {
        out.push_str("The dataset has no rows.\n\n");
    } else if view.missing.max_share() == 0.0 {
        out.push_str(&format!(
            "No missing values. See `missing.csv` and `{MISSING_MATRIX_FILE}`.\n\n"
        ));
    } else {
        out.push_str(&format!(
            "See `missing.csv` and `{MISSING_MATRIX_FILE}`.\n\n"
        ));
        if !view.problematic_columns.is_empty() {
            out.push_str(&format!(
                "### Problematic columns (missing > {})\n\n",
                pct(config.min_missing_share, 1)
            ));
            for name in view.problematic_columns {
                if let Some(entry) = view.missing.get(name) {
                    out.push_str(&format!(
                        "- `{}`: {} missing ({})\n",
                        entry.column,
                        entry.missing_count,
                        pct(entry.missing_share, 1)
                    ));
                }
            }
            out.push('\n');
        }
    }

    out.push_str("## Numeric correlation\n\n");
    if view.correlation.is_empty() {
        out.push_str("Not enough numeric columns for correlation.\n\n");
    } else {
        out.push_str("See `correlation.csv`.\n\n");
    }

    out.push_str("## Categorical columns\n\n");
    if view.top.is_empty() {
        out.push_str("No categorical or string columns found.\n\n");
    } else {
        out.push_str(&format!(
            "Top-{} values per column. See the files in `{}/`.\n\n",
            config.top_k_categories, TOP_CATEGORIES_DIR
        ));
    }

    out.push_str("## Numeric histograms\n\n");
    if view.histograms.is_empty() {
        out.push_str("No numeric columns found.\n");
    } else {
        out.push_str(&format!(
            "Histograms ({} bins) for the first {} numeric columns. See `hist_*.csv`.\n",
            config.histogram_bins,
            view.histograms.len()
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::{ReportView, render};
    use crate::analysis::{
        QualityOptions, compute_quality_flags, correlation_matrix, histograms, missing_table,
        summarize_dataset, top_categories,
    };
    use crate::report::ReportConfig;
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn render_for(ds: &DataSet, config: &ReportConfig) -> String {
        let summary = summarize_dataset(ds).unwrap();
        let missing = missing_table(ds);
        let correlation = correlation_matrix(ds);
        let top = top_categories(ds, 5, config.top_k_categories);
        let hists = histograms(ds, config.max_hist_columns, config.histogram_bins);
        let quality = compute_quality_flags(&summary, &missing, &QualityOptions::with_dataset(ds));
        let problematic: Vec<String> = missing
            .above(config.min_missing_share)
            .map(|e| e.column.clone())
            .collect();
        render(&ReportView {
            config,
            source_name: "sample.csv",
            summary: &summary,
            missing: &missing,
            correlation: &correlation,
            top: &top,
            histograms: &hists,
            quality: &quality,
            problematic_columns: &problematic,
        })
    }

    #[test]
    fn renders_quality_and_problematic_columns() {
        let schema = Schema::new(vec![
            Field::new("user_id", DataType::Int64),
            Field::new("note", DataType::Utf8),
        ]);
        let ds = DataSet::new(
            schema,
            vec![
                vec![Value::Int64(1), Value::Null],
                vec![Value::Int64(1), Value::Null],
                vec![Value::Int64(2), Value::Utf8("x".into())],
            ],
        );
        let config = ReportConfig {
            title: "Weekly check".to_string(),
            ..Default::default()
        };

        let md = render_for(&ds, &config);
        assert!(md.starts_with("# Weekly check\n"));
        assert!(md.contains("Source file: `sample.csv`"));
        assert!(md.contains("Rows: **3**, columns: **2**"));
        assert!(md.contains("- Problematic missing-share threshold: **30.0%**"));
        assert!(md.contains("- `user_id`: 1 duplicates"));
        assert!(md.contains("### Problematic columns (missing > 30.0%)"));
        assert!(md.contains("- `note`: 2 missing (66.7%)"));
        assert!(md.contains("Not enough numeric columns for correlation."));
    }

    #[test]
    fn renders_empty_dataset_sections() {
        let schema = Schema::new(vec![Field::new("x", DataType::Float64)]);
        let ds = DataSet::new(schema, vec![]);

        let md = render_for(&ds, &ReportConfig::default());
        assert!(md.contains("The dataset has no rows."));
        assert!(md.contains("No categorical or string columns found."));
    }
}
