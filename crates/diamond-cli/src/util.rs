use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::Path,
};

use anyhow::Context;

/// Writes `value` as pretty-printed JSON to `path`.
pub fn save_json<T, P>(value: &T, path: P) -> anyhow::Result<()>
where
    T: serde::Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
    writeln!(writer).with_context(|| {
        format!(
            "Failed to write newline after JSON to {}",
            path.display()
        )
    })?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush output to {}", path.display()))?;
    tracing::info!("saved report to {}", path.display());
    Ok(())
}

/// Writes `rows` as a CSV file with a header row.
pub fn save_csv<T, P>(rows: &[T], path: P) -> anyhow::Result<()>
where
    T: serde::Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write CSV row to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush CSV file: {}", path.display()))?;
    tracing::info!("saved {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// `N/A` for missing values, otherwise `digits` decimals.
pub fn format_optional(value: Option<f64>, digits: usize) -> String {
    value.map_or("N/A".to_string(), |v| format!("{v:.digits$}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_json_writes_file() {
        let path = std::env::temp_dir()
            .join(format!("diamond-save-json-{}.json", std::process::id()));
        save_json(&serde_json::json!({ "teams": 2, "ratio": 0.5 }), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(text.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["teams"], 2);
        assert_eq!(value["ratio"], 0.5);
    }

    #[test]
    fn test_save_json_reports_missing_directory() {
        let path = std::env::temp_dir()
            .join("diamond-no-such-dir")
            .join("out.json");
        let err = save_json(&1, &path).unwrap_err();
        assert!(
            err.to_string().contains("Failed to create output file"),
            "{err}"
        );
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(Some(0.3), 3), "0.300");
        assert_eq!(format_optional(Some(1.0 / 3.0), 2), "0.33");
        assert_eq!(format_optional(None, 3), "N/A");
    }
}
