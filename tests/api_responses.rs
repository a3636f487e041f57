#[cfg(test)]
mod tests {
    use cxshift::api::crosschex::{ApiResponse, Company, CompanyId, CrossChex, CrossChexConfig, PageData};
    use cxshift::api::{PunchRecord, WorkerRecord};
    use cxshift::libs::error::CxError;

    #[test]
    fn test_worker_page_accepts_numeric_and_text_workno() {
        let json = r#"{
            "code": 200,
            "message": "success",
            "data": {
                "list": [
                    {"workno": 17, "name": "Ana Horvat"},
                    {"workno": "0042", "name": "Bo Lind"}
                ],
                "pageCount": 3
            }
        }"#;

        let page = serde_json::from_str::<ApiResponse<PageData<WorkerRecord>>>(json).unwrap().into_data().unwrap();

        assert_eq!(page.page_count, 3);
        assert_eq!(page.list[0].workno, "17");
        assert_eq!(page.list[1].workno, "0042");
        assert_eq!(page.list[1].name, "Bo Lind");
    }

    #[test]
    fn test_punch_record_keeps_unknown_fields() {
        let json = r#"{
            "workno": "42",
            "name": "Ana Horvat",
            "checktime": "2023-06-01T08:00:00+02:00",
            "device": {"serial_number": "CX-001"},
            "checktype": 0
        }"#;

        let record: PunchRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.checktime, "2023-06-01T08:00:00+02:00");
        assert_eq!(record.extra["checktype"], 0);
        assert_eq!(record.extra["device"]["serial_number"], "CX-001");

        let written = serde_json::to_value(&record).unwrap();
        assert_eq!(written["device"]["serial_number"], "CX-001");
        assert_eq!(written["workno"], "42");
    }

    #[test]
    fn test_error_envelope_becomes_api_error() {
        let json = r#"{"code": 10002, "msg": "token invalid"}"#;
        let response: ApiResponse<PageData<WorkerRecord>> = serde_json::from_str(json).unwrap();

        assert!(!response.is_success());
        assert_eq!(
            response.into_data().unwrap_err(),
            CxError::Api {
                code: 10002,
                message: "token invalid".to_string()
            }
        );
    }

    #[test]
    fn test_success_without_data_is_an_error() {
        let response: ApiResponse<PageData<WorkerRecord>> = serde_json::from_str(r#"{"code": 200}"#).unwrap();
        assert!(matches!(response.into_data(), Err(CxError::Api { code: 200, .. })));
    }

    #[test]
    fn test_empty_page_defaults() {
        let json = r#"{"code": 200, "data": {}}"#;
        let page = serde_json::from_str::<ApiResponse<PageData<PunchRecord>>>(json).unwrap().into_data().unwrap();

        assert!(page.list.is_empty());
        assert_eq!(page.page_count, 0);
    }

    #[test]
    fn test_company_list_ids() {
        let json = r#"{"code": 200, "data": [{"id": 301, "name": "Main"}, {"id": "ab-7"}]}"#;
        let companies = serde_json::from_str::<ApiResponse<Vec<Company>>>(json).unwrap().into_data().unwrap();

        assert_eq!(companies[0].id, CompanyId::Number(301));
        assert_eq!(companies[0].id.to_string(), "301");
        assert_eq!(companies[1].id, CompanyId::Text("ab-7".to_string()));
        assert_eq!(companies[1].name, None);
    }

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config: CrossChexConfig = serde_json::from_str(r#"{"email": "hr@example.com"}"#).unwrap();

        assert_eq!(config.email, "hr@example.com");
        assert_eq!(config.api_url, "https://eu.crosschexcloud.com/api");
        assert_eq!(config.timeout_seconds, 120);
        assert_eq!(config.delay_seconds, 5);
        assert_eq!(config.per_page, 20);
        assert_eq!(config.offset().unwrap().local_minus_utc(), 2 * 3600);
    }

    #[test]
    fn test_client_rejects_invalid_offset() {
        let config = CrossChexConfig {
            utc_offset: "two hours".to_string(),
            ..CrossChexConfig::default()
        };
        assert!(CrossChex::new(&config).is_err());
    }

    #[test]
    fn test_new_client_is_not_connected() {
        let client = CrossChex::new(&CrossChexConfig::default()).unwrap();
        assert!(!client.is_connected());
        assert_eq!(client.config().account_name, "default");
    }
}
