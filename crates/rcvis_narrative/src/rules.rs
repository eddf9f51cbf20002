//! The standard ranked-choice FAQ.

use crate::FaqRule;
use crate::text::{comma_separated_names_with_and, format_votes, intify_or_aboutify};
use rcvis_core::{ElectionSummary, Redistribution, RoundSummary};

pub(crate) fn standard_rules() -> [FaqRule; 8] {
    [
        FaqRule {
            name: "what-happening-single-winner",
            is_active: |s, _| s.num_winners() <= 1,
            question: what_happening,
            answer: what_happening_single_winner,
        },
        FaqRule {
            name: "what-happening-multi-winner",
            is_active: |s, _| s.num_winners() > 1,
            question: what_happening,
            answer: what_happening_multi_winner,
        },
        FaqRule {
            name: "why-eliminated",
            is_active: |s, r| !eliminated(s, r).is_empty(),
            question: why_eliminated_question,
            answer: why_eliminated_answer,
        },
        FaqRule {
            name: "why-batch-eliminated",
            is_active: |s, r| eliminated(s, r).len() > 1,
            question: |s, r| format!("Why were {} candidates eliminated?", eliminated(s, r).len()),
            answer: why_batch_eliminated_answer,
        },
        FaqRule {
            name: "why-single-winner",
            is_active: |s, r| s.num_winners() == 1 && elected(s, r).len() == 1,
            question: |s, r| format!("Why was {} elected?", first_elected(s, r)),
            answer: |s, r| {
                format!(
                    "Because {} received more than 50% of the votes, they were elected.",
                    first_elected(s, r)
                )
            },
        },
        FaqRule {
            name: "why-multi-winner",
            is_active: multi_winner_round,
            question: why_multi_winner_question,
            answer: why_multi_winner_answer,
        },
        FaqRule {
            name: "why-threshold",
            is_active: multi_winner_round,
            question: |s, _| format!("Why did they need {} votes to win?", format_votes(s.threshold)),
            answer: why_threshold_answer,
        },
        FaqRule {
            name: "why-surplus-transfer",
            is_active: |s, r| redistribution(s, r).is_some(),
            question: why_surplus_question,
            answer: why_surplus_answer,
        },
    ]
}

fn round(summary: &ElectionSummary, round: usize) -> Option<&RoundSummary> {
    summary.rounds.get(round)
}

fn eliminated(summary: &ElectionSummary, r: usize) -> &[String] {
    round(summary, r)
        .map(|rs| rs.eliminated_names.as_slice())
        .unwrap_or_default()
}

fn elected(summary: &ElectionSummary, r: usize) -> &[String] {
    round(summary, r)
        .map(|rs| rs.winner_names.as_slice())
        .unwrap_or_default()
}

fn first_elected(summary: &ElectionSummary, r: usize) -> &str {
    elected(summary, r).first().map_or("", String::as_str)
}

fn redistribution(summary: &ElectionSummary, r: usize) -> Option<&Redistribution> {
    round(summary, r)
        .and_then(|rs| rs.redistribution.as_ref())
        .filter(|d| !d.names.is_empty())
}

fn multi_winner_round(summary: &ElectionSummary, r: usize) -> bool {
    summary.num_winners() > 1 && !elected(summary, r).is_empty()
}

/// One in this many voters must back each winner.
fn support_count(summary: &ElectionSummary) -> usize {
    summary.num_winners() + 1
}

fn what_happening(_: &ElectionSummary, _: usize) -> String {
    "What is happening?".to_string()
}

fn what_happening_single_winner(summary: &ElectionSummary, _: usize) -> String {
    let mut text = String::from(
        "This is a single-winner Ranked Choice Voting election, \
         also known as an Instant Runoff Election. \
         Voters have ranked their candidates in order of preference. \
         Each voter still only had one vote, but if their top pick wasn't going to win, \
         their next choices were taken into account. ",
    );
    text.push_str(&format!(
        "The {} lowest-performing candidates were eliminated in succession",
        summary.num_eliminated()
    ));
    match summary.winner_names.first() {
        Some(winner) => text.push_str(&format!(
            " until {} received more than 50% of the votes.",
            winner
        )),
        None => text.push('.'),
    }
    text
}

fn what_happening_multi_winner(summary: &ElectionSummary, _: usize) -> String {
    let seats = summary.num_winners();
    format!(
        "This is a multi-winner Ranked Choice Voting election, \
         also known as a Single Transferable Vote Election. \
         There were {seats} seats to be filled. \
         Voters have ranked their candidates in order of preference. \
         Each voter still only had one vote. \
         The lowest-performing candidates were eliminated until \
         {seats} candidates have been elected."
    )
}

fn why_eliminated_question(summary: &ElectionSummary, r: usize) -> String {
    match eliminated(summary, r) {
        [only] => format!("Why was {} eliminated?", only),
        names => format!(
            "Why were {} eliminated?",
            comma_separated_names_with_and(names)
        ),
    }
}

fn why_eliminated_answer(_: &ElectionSummary, _: usize) -> String {
    "Because they had the fewest votes and could not win the election, \
     they were eliminated. \
     To ensure people who voted for them still had their voices heard, \
     their votes were transferred to their next choice. \
     If you are familiar with the concept of runoff elections, \
     you can think of these eliminations as holding a runoff \
     without going back to the voting booth."
        .to_string()
}

fn why_batch_eliminated_answer(summary: &ElectionSummary, r: usize) -> String {
    format!(
        "This is known as \"batch elimination.\" \
         Since the order of elimination did not affect the outcome, \
         these {} candidates were eliminated in the same round.",
        eliminated(summary, r).len()
    )
}

fn why_multi_winner_question(summary: &ElectionSummary, r: usize) -> String {
    let winners = elected(summary, r);
    let were_or_was = if winners.len() == 1 { "was" } else { "were" };
    format!(
        "Why {} {} elected?",
        were_or_was,
        comma_separated_names_with_and(winners)
    )
}

fn why_multi_winner_answer(summary: &ElectionSummary, r: usize) -> String {
    let threshold = format_votes(summary.threshold);
    format!(
        "Because {} received {threshold} votes, they were elected. \
         The threshold of {threshold} votes was chosen to achieve proportional \
         representation, equal to at least one out of every {} voters \
         supporting this candidate.",
        comma_separated_names_with_and(elected(summary, r)),
        support_count(summary)
    )
}

fn why_threshold_answer(summary: &ElectionSummary, _: usize) -> String {
    format!(
        "In a single-winner election, each elected candidate needs \
         one in two voters to support them. Since each voter only gets one vote, \
         the same requirement is not possible for this Single Transferrable Vote \
         election. Instead, one in {} voters must support \
         each elected candidate.",
        support_count(summary)
    )
}

fn why_surplus_question(summary: &ElectionSummary, r: usize) -> String {
    let Some(transfer) = redistribution(summary, r) else {
        return String::new();
    };
    format!(
        "Why did {} lose {} votes?",
        comma_separated_names_with_and(&transfer.names),
        intify_or_aboutify(transfer.total)
    )
}

fn why_surplus_answer(summary: &ElectionSummary, r: usize) -> String {
    let Some(transfer) = redistribution(summary, r) else {
        return String::new();
    };
    let threshold = format_votes(summary.threshold);
    format!(
        "A principle of RCV is that no vote should be wasted. \
         Since {} only needed {threshold} votes, \
         any vote beyond that should not be wasted, and is instead redistributed. \
         This also ensures that {} candidates can reach the \
         {threshold}-vote threshold.",
        comma_separated_names_with_and(&transfer.names),
        elected(summary, r).len()
    )
}
