//! Tests for the standard FAQ rules.

use rcvis_core::{ElectionSummary, NarrationPair, Redistribution, ResultRecord, RoundSummary};
use rcvis_interface::NarrationSource;
use rcvis_narrative::{FaqNarrator, FaqRegistry, FaqRule};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn single_winner() -> ElectionSummary {
    ElectionSummary {
        title: "Mayor".to_string(),
        threshold: 501.0,
        winner_names: names(&["Ada"]),
        rounds: vec![
            RoundSummary {
                eliminated_names: names(&["Cy", "Dee"]),
                ..Default::default()
            },
            RoundSummary {
                eliminated_names: names(&["Bob"]),
                ..Default::default()
            },
            RoundSummary {
                winner_names: names(&["Ada"]),
                ..Default::default()
            },
        ],
    }
}

fn multi_winner() -> ElectionSummary {
    ElectionSummary {
        title: "Council".to_string(),
        threshold: 250.0,
        winner_names: names(&["Ada", "Bob"]),
        rounds: vec![
            RoundSummary {
                winner_names: names(&["Ada"]),
                ..Default::default()
            },
            RoundSummary {
                redistribution: Some(Redistribution {
                    names: names(&["Ada"]),
                    total: 41.6,
                }),
                eliminated_names: names(&["Cy"]),
                ..Default::default()
            },
            RoundSummary {
                winner_names: names(&["Bob"]),
                ..Default::default()
            },
        ],
    }
}

fn questions(pairs: &[NarrationPair]) -> Vec<&str> {
    pairs.iter().map(|p| p.question.as_str()).collect()
}

#[test]
fn test_standard_priority_order() {
    assert_eq!(
        FaqRegistry::standard().names(),
        vec![
            "what-happening-single-winner",
            "what-happening-multi-winner",
            "why-eliminated",
            "why-batch-eliminated",
            "why-single-winner",
            "why-multi-winner",
            "why-threshold",
            "why-surplus-transfer",
        ]
    );
}

#[test]
fn test_single_winner_rounds() {
    let registry = FaqRegistry::standard();
    let summary = single_winner();

    let first = registry.describe_round(&summary, 0);
    assert_eq!(
        questions(&first),
        vec![
            "What is happening?",
            "Why were Cy and Dee eliminated?",
            "Why were 2 candidates eliminated?",
        ]
    );
    assert!(first[0].answer.contains("The 3 lowest-performing candidates"));
    assert!(first[0].answer.ends_with("until Ada received more than 50% of the votes."));
    assert!(first[2].answer.contains("these 2 candidates were eliminated in the same round"));

    let second = registry.describe_round(&summary, 1);
    assert_eq!(questions(&second)[1], "Why was Bob eliminated?");

    let last = registry.describe_round(&summary, 2);
    assert_eq!(questions(&last), vec!["What is happening?", "Why was Ada elected?"]);
    assert_eq!(
        last[1].answer,
        "Because Ada received more than 50% of the votes, they were elected."
    );
}

#[test]
fn test_no_winner_answer_ends_with_period() {
    let mut summary = single_winner();
    summary.winner_names.clear();
    summary.rounds[2].winner_names.clear();

    let pairs = FaqRegistry::standard().describe_round(&summary, 2);
    assert_eq!(pairs.len(), 1);
    assert!(pairs[0].answer.ends_with("eliminated in succession."));
}

#[test]
fn test_multi_winner_rounds() {
    let registry = FaqRegistry::standard();
    let summary = multi_winner();

    let first = registry.describe_round(&summary, 0);
    assert_eq!(
        questions(&first),
        vec![
            "What is happening?",
            "Why was Ada elected?",
            "Why did they need 250 votes to win?",
        ]
    );
    assert!(first[0].answer.contains("There were 2 seats to be filled."));
    assert!(first[1].answer.starts_with("Because Ada received 250 votes"));
    assert!(first[1].answer.contains("one out of every 3 voters"));
    assert!(first[2].answer.contains("one in 3 voters must support"));

    let second = registry.describe_round(&summary, 1);
    assert_eq!(
        questions(&second),
        vec![
            "What is happening?",
            "Why was Cy eliminated?",
            "Why did Ada lose about 42 votes?",
        ]
    );
    assert!(second[2].answer.contains("Since Ada only needed 250 votes"));
    assert!(second[2].answer.contains("0 candidates can reach the 250-vote threshold"));
}

#[test]
fn test_empty_redistribution_is_inactive() {
    let mut summary = multi_winner();
    summary.rounds[1].redistribution = Some(Redistribution::default());

    let pairs = FaqRegistry::standard().describe_round(&summary, 1);
    assert!(!questions(&pairs).iter().any(|q| q.contains("lose")));
}

#[test]
fn test_out_of_range_round_is_empty() {
    assert!(FaqRegistry::standard().describe_round(&single_winner(), 7).is_empty());
}

#[test]
fn test_register_replaces_in_place() {
    let mut registry = FaqRegistry::standard();
    registry.register(FaqRule {
        name: "why-eliminated",
        is_active: |_, _| true,
        question: |_, _| "Who left?".to_string(),
        answer: |_, _| "Someone.".to_string(),
    });
    assert_eq!(registry.len(), 8);
    assert_eq!(registry.names()[2], "why-eliminated");

    let pairs = registry.describe_round(&single_winner(), 2);
    assert_eq!(questions(&pairs)[1], "Who left?");
}

#[test]
fn test_narrator_describes_every_round() {
    let record = ResultRecord::builder()
        .id(7)
        .slug("mayor-2024")
        .summary(single_winner())
        .build()
        .unwrap();

    let rounds = FaqNarrator::default().describe_all_rounds(&record).unwrap();
    assert_eq!(rounds.len(), 3);
    assert_eq!(rounds.iter().map(|r| r.round).collect::<Vec<_>>(), vec![0, 1, 2]);
    assert!(rounds.iter().all(|r| r.speech_text().is_some()));
}

#[test]
fn test_narrator_rejects_empty_summary() {
    let record = ResultRecord::builder()
        .id(9)
        .slug("empty")
        .summary(ElectionSummary::default())
        .build()
        .unwrap();

    assert!(FaqNarrator::default().describe_all_rounds(&record).is_err());
}

#[test]
fn test_summary_deserializes_with_defaults() {
    let summary: ElectionSummary = serde_json::from_str(
        r#"{
            "title": "Mayor",
            "threshold": 10,
            "rounds": [{"eliminated_names": ["Bob"]}, {}]
        }"#,
    )
    .unwrap();
    let rounds = FaqRegistry::standard().describe_all_rounds(&summary);
    assert_eq!(rounds.len(), 2);
    assert_eq!(rounds[1].pairs.len(), 1);
}
