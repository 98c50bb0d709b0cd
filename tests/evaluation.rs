//! Tests for ground-truth parsing, prediction loading and scoring.
mod common;
use common::*;
use flowscribe::config::EvaluationConfig;
use flowscribe::evaluation::{GLOBAL_SECTION, parse_predictions};
use flowscribe::prelude::*;

fn predictions(file: &str, steps: &[(&str, &str)]) -> Predictions {
    let mut predictions = Predictions::new();
    predictions.insert(
        file.to_string(),
        steps
            .iter()
            .map(|(action, role)| PredictedStep::new(*action).with_role(*role))
            .collect(),
    );
    predictions
}

#[cfg(test)]
mod ground_truth_tests {
    use super::*;

    #[test]
    fn test_parses_sectioned_document() {
        let gt = GroundTruth::parse(GROUND_TRUTH_TEXT);

        assert_eq!(gt.section_names().collect::<Vec<_>>(), vec!["a.png"]);
        assert_eq!(
            gt.section("a.png").unwrap(),
            &[
                GroundTruthEntry::new("Approve", "Manager"),
                GroundTruthEntry::new("Reject", "Manager"),
            ]
        );
        let json = serde_json::to_value(&gt).unwrap();
        assert_eq!(json["a.png"][0]["description"], "Approve");
        assert_eq!(json["a.png"][1]["role"], "Manager");
    }

    #[test]
    fn test_unsectioned_lines_form_global_group() {
        let gt = GroundTruth::parse("1. Receive invoice\n2) Pay invoice\tAccountant\n");

        assert_eq!(gt.len(), 1);
        let entries = gt.entries_for("anything.png");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1], GroundTruthEntry::new("Pay invoice", "Accountant"));
        assert!(gt.section(GLOBAL_SECTION).is_some());
    }

    #[test]
    fn test_empty_file_section_falls_back_to_global() {
        let gt = GroundTruth::parse("1. Shared step\n### empty.png\n### b.png\n1. Own step\n");

        assert_eq!(gt.entries_for("empty.png")[0].description, "Shared step");
        assert_eq!(gt.entries_for("b.png")[0].description, "Own step");
        assert_eq!(gt.entries_for("missing.png")[0].description, "Shared step");
    }

    #[test]
    fn test_unknown_file_without_global_has_no_entries() {
        let gt = GroundTruth::parse(GROUND_TRUTH_TEXT);
        assert!(gt.entries_for("other.png").is_empty());
        assert!(gt.section(GLOBAL_SECTION).is_none());
    }

    #[test]
    fn test_carriage_return_line_endings() {
        let gt = GroundTruth::parse("### a.png\r1. Approve | Manager\r2. Reject | Manager\r");
        assert_eq!(gt.section_names().collect::<Vec<_>>(), vec!["a.png"]);
        assert_eq!(
            gt.entries_for("a.png"),
            &[
                GroundTruthEntry::new("Approve", "Manager"),
                GroundTruthEntry::new("Reject", "Manager"),
            ]
        );

        let windows = GroundTruth::parse("### a.png\r\n1. Approve | Manager\r\n");
        assert_eq!(windows.entries_for("a.png").len(), 1);
    }

    #[test]
    fn test_blank_and_role_only_lines_are_skipped() {
        let gt = GroundTruth::parse("### a.png\n\n   \n1. | Manager\n2. Approve\n");
        assert_eq!(
            gt.entries_for("a.png"),
            &[
                GroundTruthEntry::new("Manager", ""),
                GroundTruthEntry::new("Approve", "")
            ]
        );
    }

    #[test]
    fn test_invalid_utf8_is_ignored() {
        let mut bytes = b"### a.png\n1. Appr".to_vec();
        bytes.push(0xFF);
        bytes.extend_from_slice(b"ove | Manager\n");

        let gt = GroundTruth::from_bytes(&bytes);
        assert_eq!(
            gt.entries_for("a.png"),
            &[GroundTruthEntry::new("Approve", "Manager")]
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = GroundTruth::from_file("/definitely/not/here.txt");
        assert!(matches!(result, Err(GroundTruthError::Io { .. })));
    }
}

#[cfg(test)]
mod prediction_tests {
    use super::*;
    use flowscribe::error::EvaluationInputError;

    #[test]
    fn test_accepts_objects_and_strings() {
        let parsed = parse_predictions(
            r#"{
                "b.png": [
                    {"action": "Approve", "description": "ignored", "role": "Manager"},
                    {"description": "Reject"},
                    {"action": "", "description": "Escalate"},
                    "Archive"
                ],
                "a.png": []
            }"#,
        )
        .unwrap();

        assert_eq!(parsed.keys().collect::<Vec<_>>(), vec!["b.png", "a.png"]);
        let texts: Vec<&str> = parsed["b.png"].iter().map(PredictedStep::text).collect();
        assert_eq!(texts, vec!["Approve", "Reject", "Escalate", "Archive"]);
        assert_eq!(parsed["b.png"][0].role_text(), "Manager");
        assert_eq!(parsed["b.png"][1].role_text(), "");
    }

    #[test]
    fn test_unreadable_file_is_an_io_error() {
        let result = flowscribe::evaluation::load_predictions("/definitely/not/here.json");
        assert!(matches!(result, Err(EvaluationInputError::Io { .. })));
    }

    #[test]
    fn test_rejects_wrong_shapes() {
        assert!(matches!(
            parse_predictions("[]"),
            Err(EvaluationInputError::NotAnObject)
        ));
        assert!(matches!(
            parse_predictions(r#"{"a.png": "Approve"}"#),
            Err(EvaluationInputError::StepsNotAList { file }) if file == "a.png"
        ));
        assert!(matches!(
            parse_predictions(r#"{"a.png": ["Approve", 42]}"#),
            Err(EvaluationInputError::InvalidStep { index: 1, .. })
        ));
        assert!(matches!(
            parse_predictions("{"),
            Err(EvaluationInputError::JsonParseError(_))
        ));
    }
}

#[cfg(test)]
mod scoring_tests {
    use super::*;

    #[test]
    fn test_identical_predictions_score_perfectly() {
        let gt = GroundTruth::parse(GROUND_TRUTH_TEXT);
        let preds = predictions("a.png", &[("Approve", "Manager"), ("Reject", "Manager")]);

        let report = evaluate_predictions(&preds, &gt);
        assert_eq!(report.summary.step_precision, 1.0);
        assert_eq!(report.summary.step_recall, 1.0);
        assert_eq!(report.summary.step_f1, 1.0);
        assert_eq!(report.summary.order_accuracy, 1.0);
        assert_eq!(report.summary.role_accuracy, 1.0);
        assert_eq!(report.summary.avg_match_score, 100.0);
    }

    #[test]
    fn test_empty_predictions_have_zero_recall() {
        let gt = GroundTruth::parse("### a.png\n1. Receive\n2. Approve\n3. Archive\n");
        let preds = predictions("a.png", &[]);

        let report = evaluate_predictions(&preds, &gt);
        let file = &report.per_file[0];
        assert_eq!(file.tp, 0);
        assert_eq!(file.fn_, 3);
        assert_eq!(file.fp, 0);
        assert_eq!(report.summary.step_recall, 0.0);
        assert_eq!(report.summary.step_precision, 0.0);
        assert_eq!(report.summary.step_f1, 0.0);
        assert_eq!(report.summary.order_accuracy, 0.0);
    }

    #[test]
    fn test_partial_match() {
        let gt = GroundTruth::parse(GROUND_TRUTH_TEXT);
        let preds = predictions("a.png", &[("approve", ""), ("Escalate to director", "")]);

        let report = evaluate_predictions(&preds, &gt);
        let file = &report.per_file[0];
        assert_eq!((file.tp, file.fp, file.fn_), (1, 1, 1));
        assert_eq!(file.order_ok, 1);
        assert_eq!(file.order_total, 2);
        // Matched on description, but the empty predicted role misses "Manager".
        assert_eq!((file.role_ok, file.role_total), (0, 1));
        assert_eq!(report.summary.step_precision, 0.5);
        assert_eq!(report.summary.step_recall, 0.5);
        assert_eq!(report.summary.step_f1, 0.5);
        assert_eq!(report.summary.order_accuracy, 0.5);
        assert_eq!(report.summary.role_accuracy, 0.0);
    }

    #[test]
    fn test_exact_ties_round_to_even() {
        let gt = GroundTruth::parse("### a.png\n1. Approve\n");
        let mut steps = vec![("Approve", "")];
        steps.extend(std::iter::repeat_n(("Escalate to director", ""), 31));
        let preds = predictions("a.png", &steps);

        let report = evaluate_predictions(&preds, &gt);
        assert_eq!((report.per_file[0].tp, report.per_file[0].fp), (1, 31));
        // 1 / 32 = 0.03125
        assert_eq!(report.summary.step_precision, 0.0312);
        assert_eq!(report.summary.step_recall, 1.0);
    }

    #[test]
    fn test_order_is_position_wise() {
        let gt = GroundTruth::parse(GROUND_TRUTH_TEXT);
        let preds = predictions("a.png", &[("Reject", "Manager"), ("Approve", "Manager")]);

        let report = evaluate_predictions(&preds, &gt);
        assert_eq!(report.summary.step_precision, 1.0);
        assert_eq!(report.summary.order_accuracy, 0.0);
    }

    #[test]
    fn test_files_are_pooled() {
        let gt = GroundTruth::parse(
            "### a.png\n1. Approve\n2. Reject\n### b.png\n1. Ship order\n2. Close order\n",
        );
        let mut preds = predictions("a.png", &[("Approve", ""), ("Reject", "")]);
        preds.extend(predictions("b.png", &[("Ship order", ""), ("Call customer", "")]));

        let report = evaluate_predictions(&preds, &gt);
        assert_eq!(report.per_file.len(), 2);
        assert_eq!(report.per_file[0].file, "a.png");
        assert_eq!(report.per_file[1].file, "b.png");
        // 3 of 4 predictions matched, 3 of 4 expected steps found.
        assert_eq!(report.summary.step_precision, 0.75);
        assert_eq!(report.summary.step_recall, 0.75);
        assert_eq!(report.summary.order_accuracy, 0.75);
        // No expected roles at all.
        assert_eq!(report.summary.role_accuracy, 0.0);
    }

    #[test]
    fn test_thresholds_are_configurable() {
        let gt = GroundTruth::parse("### a.png\n1. Approve request\n");
        let preds = predictions("a.png", &[("Approve requests", "")]);

        let strict = Evaluator::new(EvaluationConfig {
            match_threshold: 100,
            role_threshold: 70,
        })
        .evaluate(&preds, &gt);
        assert_eq!(strict.per_file[0].tp, 0);
        assert_eq!(strict.meta.threshold, 100);

        let lenient = Evaluator::default().evaluate(&preds, &gt);
        assert_eq!(lenient.per_file[0].tp, 1);
        // 2 * 15 / 31, truncated.
        assert_eq!(lenient.per_file[0].avg_match_score, 96.0);
    }

    #[test]
    fn test_report_json_keys() {
        let gt = GroundTruth::parse(GROUND_TRUTH_TEXT);
        let preds = predictions("a.png", &[("Approve", "Manager")]);

        let value = serde_json::to_value(evaluate_predictions(&preds, &gt)).unwrap();
        assert_eq!(value["meta"]["threshold"], 70);
        assert!(value["summary"]["step_f1@70"].is_number());
        assert!(value["summary"]["role_accuracy@70"].is_number());
        assert_eq!(value["per_file"][0]["fn"], 1);
        assert_eq!(value["per_file"][0]["gt_len"], 2);
        assert!(value["per_file"][0].get("matches").is_none());
    }
}
