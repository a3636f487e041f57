#[cfg(test)]
mod tests {
    use cxshift::api::PunchRecord;
    use cxshift::libs::data_storage::DataStorage;
    use cxshift::libs::export::{Exporter, RowKind, ShiftRow};
    use cxshift::libs::formatter::{FormattedOrphan, FormattedReport, FormattedShift};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ExportTestContext {
        temp_dir: TempDir,
        reports: Vec<FormattedReport>,
    }

    impl TestContext for ExportTestContext {
        fn setup() -> Self {
            let report = FormattedReport {
                workno: "42".to_string(),
                name: "Ana Horvat".to_string(),
                shifts: vec![FormattedShift {
                    start: "2023-06-01 08:00:00".to_string(),
                    end: "2023-06-01 16:30:00".to_string(),
                    duration: "08:30".to_string(),
                    punches: 2,
                }],
                orphans: vec![FormattedOrphan {
                    timestamp: "2023-06-02 08:00:00".to_string(),
                    note: "missing punch".to_string(),
                }],
            };
            ExportTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
                reports: vec![report],
            }
        }
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_shifts_csv(ctx: &mut ExportTestContext) {
        let output_path = ctx.temp_dir.path().join("nested").join("shifts.csv");

        let rows = Exporter::shifts_csv(&output_path, &ctx.reports).unwrap();
        assert_eq!(rows, 2);

        let content = std::fs::read_to_string(&output_path).unwrap();
        assert!(content.starts_with("workno,name,kind,start,end,duration,punches"));

        let mut reader = csv::Reader::from_path(&output_path).unwrap();
        let parsed: Vec<ShiftRow> = reader.deserialize().map(|row| row.unwrap()).collect();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].kind, RowKind::Shift);
        assert_eq!(parsed[0].duration, "08:30");
        assert_eq!(parsed[1].kind, RowKind::Orphan);
        assert_eq!(parsed[1].start, "2023-06-02 08:00:00");
        assert_eq!(parsed[1].end, "");
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_empty_csv_has_header(ctx: &mut ExportTestContext) {
        let output_path = ctx.temp_dir.path().join("empty.csv");

        let rows = Exporter::shifts_csv(&output_path, &[]).unwrap();
        assert_eq!(rows, 0);

        let content = std::fs::read_to_string(&output_path).unwrap();
        assert_eq!(content.trim(), "workno,name,kind,start,end,duration,punches");
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_export_punches_json(ctx: &mut ExportTestContext) {
        let output_path = ctx.temp_dir.path().join("punches.json");
        let mut extra = serde_json::Map::new();
        extra.insert("checktype".to_string(), serde_json::json!(1));
        let records = vec![PunchRecord {
            workno: "42".to_string(),
            name: "Ana Horvat".to_string(),
            checktime: "2023-06-01T08:00:00+02:00".to_string(),
            extra,
        }];

        let count = Exporter::punches_json(&output_path, &records).unwrap();
        assert_eq!(count, 1);

        let content = std::fs::read_to_string(&output_path).unwrap();
        let written: Vec<PunchRecord> = serde_json::from_str(&content).unwrap();
        assert_eq!(written, records);
    }

    #[test_context(ExportTestContext)]
    #[test]
    fn test_default_paths_use_account_name(ctx: &mut ExportTestContext) {
        let storage = DataStorage::at(ctx.temp_dir.path());

        let csv_path = Exporter::default_csv_path(&storage, "plant-a").unwrap();
        let json_path = Exporter::default_json_path(&storage, "plant-a").unwrap();

        assert_eq!(csv_path, ctx.temp_dir.path().join("exports").join("plant-a.csv"));
        assert_eq!(json_path, ctx.temp_dir.path().join("downloads").join("plant-a.json"));
        assert!(ctx.temp_dir.path().join("exports").is_dir());
        assert!(ctx.temp_dir.path().join("downloads").is_dir());
    }
}
