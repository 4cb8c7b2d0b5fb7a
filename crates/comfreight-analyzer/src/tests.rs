//! Integration tests for the Analyzer

#[cfg(test)]
mod tests {
    use crate::{
        AnalysisError, AnalyzerConfig, Applied, DraftError, ExceptionAnalyzer, ExceptionDraft,
        RETRY_MESSAGE, UNEXPECTED_FORMAT_MESSAGE,
    };
    use chrono::Utc;
    use comfreight_domain::traits::ShipmentStore;
    use comfreight_domain::{AiAnalysis, NewShipment, ShipmentStatus};
    use comfreight_llm::MockProvider;
    use comfreight_store::InMemoryStore;
    use std::time::Duration;

    const WELL_FORMED: &str =
        r#"{"category":"Damage","suggestedActions":["Inspect crate","File claim"]}"#;

    fn analyzer(llm: MockProvider) -> ExceptionAnalyzer<MockProvider> {
        ExceptionAnalyzer::new(llm, AnalyzerConfig::default())
    }

    #[tokio::test]
    async fn test_well_formed_response() {
        let analyzer = analyzer(MockProvider::new(WELL_FORMED));

        let analysis = analyzer.analyze("Crate dropped").await.unwrap();

        assert_eq!(
            analysis,
            Some(AiAnalysis::new(
                "Damage",
                vec!["Inspect crate".to_string(), "File claim".to_string()]
            ))
        );
        assert_eq!(analyzer.provider().call_count(), 1);
    }

    #[tokio::test]
    async fn test_request_carries_prompt_and_schema() {
        let analyzer = analyzer(MockProvider::new(WELL_FORMED));

        analyzer.analyze("  Forklift punctured the crate ").await.unwrap();

        let prompt = analyzer.provider().last_prompt().unwrap();
        assert!(prompt.starts_with("You are a logistics and supply chain expert."));
        assert!(prompt.ends_with("Description: \"Forklift punctured the crate\""));

        let schema = analyzer.provider().last_schema().unwrap();
        assert!(schema.contains("suggestedActions"));
        assert!(schema.contains("Customs Issue"));
    }

    #[tokio::test]
    async fn test_missing_field_is_unavailable() {
        let analyzer = analyzer(MockProvider::new(r#"{"category":"Damage"}"#));

        let analysis = analyzer.analyze("Crate dropped").await.unwrap();
        assert_eq!(analysis, None);
    }

    #[tokio::test]
    async fn test_non_json_is_error() {
        let analyzer = analyzer(MockProvider::new("Sorry, I can't help with that."));

        let result = analyzer.analyze("Crate dropped").await;
        assert!(matches!(result, Err(AnalysisError::InvalidJson(_))));
    }

    #[tokio::test]
    async fn test_transport_failure_leaves_store_untouched() {
        let mut store = InMemoryStore::seeded();
        let before = store.list();
        let analyzer = analyzer(MockProvider::failing());

        let result = analyzer.analyze("Crate dropped").await;

        assert!(matches!(result, Err(AnalysisError::Provider(_))));
        assert_eq!(result.unwrap_err().user_message(), RETRY_MESSAGE);
        assert_eq!(store.list(), before);

        // Logging without analysis still works after a failure
        let id = before[0].id;
        let logged = store
            .log_exception(id, comfreight_domain::ExceptionRecord::new(Utc::now(), "Crate dropped"))
            .unwrap();
        assert_eq!(logged.exceptions.last().unwrap().ai_analysis, None);
    }

    #[tokio::test]
    async fn test_empty_description_skips_service() {
        let analyzer = analyzer(MockProvider::new(WELL_FORMED));

        let result = analyzer.analyze("   \n").await;

        assert_eq!(result, Err(AnalysisError::EmptyDescription));
        assert_eq!(analyzer.provider().call_count(), 0);
    }

    #[tokio::test]
    async fn test_description_too_long() {
        let config = AnalyzerConfig {
            max_description_length: 10,
            ..AnalyzerConfig::default()
        };
        let analyzer = ExceptionAnalyzer::new(MockProvider::new(WELL_FORMED), config);

        let result = analyzer.analyze("This description is too long").await;

        assert!(matches!(result, Err(AnalysisError::DescriptionTooLong(_, 10))));
        assert_eq!(analyzer.provider().call_count(), 0);
    }

    #[tokio::test]
    async fn test_timeout() {
        let llm = MockProvider::new(WELL_FORMED).with_latency(Duration::from_secs(3));
        let config = AnalyzerConfig {
            timeout_secs: 1,
            ..AnalyzerConfig::default()
        };
        let analyzer = ExceptionAnalyzer::new(llm, config);

        let result = analyzer.analyze("Crate dropped").await;
        assert_eq!(result, Err(AnalysisError::Timeout));
    }

    #[tokio::test]
    async fn test_no_automatic_retry() {
        let analyzer = analyzer(MockProvider::failing());

        let _ = analyzer.analyze("Crate dropped").await;
        assert_eq!(analyzer.provider().call_count(), 1);
    }

    #[tokio::test]
    async fn test_analyze_draft_outcomes() {
        let analyzer = analyzer(MockProvider::new(WELL_FORMED));
        let mut draft = ExceptionDraft::new();

        assert_eq!(
            analyzer.analyze_draft(&mut draft).await,
            Err(DraftError::EmptyDescription)
        );

        draft.set_description("Crate dropped");
        assert_eq!(analyzer.analyze_draft(&mut draft).await, Ok(Applied::Analysis));
        assert_eq!(draft.analysis().unwrap().category, "Damage");

        let analyzer = self::analyzer(MockProvider::new(r#"{"suggestedActions":[]}"#));
        draft.set_description("Crate dropped again");
        assert_eq!(analyzer.analyze_draft(&mut draft).await, Ok(Applied::Unavailable));
        assert_eq!(draft.error(), Some(UNEXPECTED_FORMAT_MESSAGE));
    }

    #[tokio::test]
    async fn test_result_for_edited_draft_is_discarded() {
        let analyzer = analyzer(MockProvider::new(WELL_FORMED));
        let mut draft = ExceptionDraft::new();
        draft.set_description("Crate dropped");

        let ticket = draft.begin_analysis().unwrap();
        let pending = analyzer.analyze(ticket.description());
        draft.set_description("Crate dropped in the rain");
        let result = pending.await;

        assert_eq!(draft.finish_analysis(ticket, result), Applied::Discarded);
        assert_eq!(draft.analysis(), None);
    }

    #[tokio::test]
    async fn test_end_to_end_with_store() {
        let mut store = InMemoryStore::new();
        let created = store
            .create(NewShipment::new(
                "Los Angeles, CA",
                "New York, NY",
                "FedEx Freight",
                "2026-11-02",
            ))
            .unwrap();

        let analyzer = analyzer(MockProvider::new(WELL_FORMED));
        let mut draft = ExceptionDraft::new();
        draft.set_description("Pallet arrived crushed");
        analyzer.analyze_draft(&mut draft).await.unwrap();

        let record = draft.submit(Utc::now()).unwrap();
        let updated = store.log_exception(created.id, record).unwrap();

        assert_eq!(updated.status, ShipmentStatus::Exception);
        assert_eq!(updated.exceptions.len(), 1);
        let analysis = updated.exceptions[0].ai_analysis.as_ref().unwrap();
        assert_eq!(analysis.category, "Damage");
        assert_eq!(analysis.suggested_actions.len(), 2);
        assert_eq!(store.get(created.id), Some(updated));
    }
}
