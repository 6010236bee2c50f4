//! Turns a completion reply into advice points.
//!
//! The reply is free text; the only structure relied upon is one
//! recommendation per line, optionally bulleted.

use crate::{AdviceRequest, Metrics, Usd};

/// Shortest line, in characters, kept as advice.
pub const MIN_ADVICE_CHARS: usize = 10;

const BULLETS: [char; 3] = ['•', '-', '*'];

/// Extracts advice points from raw completion text, keeping their order.
///
/// Lines are trimmed, a single leading bullet is stripped and the first
/// letter is capitalized. Lines shorter than [`MIN_ADVICE_CHARS`] or not
/// starting with an ASCII uppercase letter are dropped.
pub fn extract_advice(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| capitalize(strip_bullet(line)))
        .filter(|point| {
            point.chars().count() >= MIN_ADVICE_CHARS
                && point.starts_with(|c: char| c.is_ascii_uppercase())
        })
        .collect()
}

/// Advice used when the reply yields no point. Always three entries.
pub fn fallback_advice(request: &AdviceRequest, metrics: &Metrics) -> Vec<String> {
    let reduction = if metrics.monthly_net < 0.0 {
        Usd(metrics.monthly_net.abs()).to_string()
    } else {
        "10%".to_string()
    };
    let tracked = metrics
        .top_categories
        .iter()
        .take(3)
        .map(|(category, _)| category.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    vec![
        format!(
            "Create an emergency fund by saving {} monthly until you have 3 months of expenses saved",
            Usd(request.expenses * 0.1)
        ),
        format!("Reduce expenses by {reduction} to improve your savings rate"),
        format!("Track your spending in {tracked} categories to identify potential savings"),
    ]
}

/// Extracts advice from `text`, falling back to [`fallback_advice`] when
/// nothing qualifies.
pub fn advice_or_fallback(text: &str, request: &AdviceRequest, metrics: &Metrics) -> Vec<String> {
    let advice = extract_advice(text);
    if advice.is_empty() {
        tracing::warn!("completion reply held no usable advice, using fallback");
        return fallback_advice(request, metrics);
    }
    advice
}

fn strip_bullet(line: &str) -> &str {
    match line.strip_prefix(BULLETS) {
        Some(rest) => rest.trim_start(),
        None => line,
    }
}

fn capitalize(line: &str) -> String {
    let mut chars = line.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Transaction;

    fn request(transactions: Vec<(f64, &str)>, balance: f64, income: f64, expenses: f64) -> AdviceRequest {
        AdviceRequest {
            transactions: transactions
                .into_iter()
                .map(|(amount, category)| Transaction {
                    amount,
                    category: category.to_string(),
                    date: "2024-01-01".to_string(),
                })
                .collect(),
            total_balance: balance,
            income,
            expenses,
        }
    }

    #[test]
    fn strips_bullets_and_keeps_order() {
        let reply = "Here are my recommendations:\n\n\
                     • Reduce dining out by 30% to save $150 monthly\n\
                     - create an emergency fund of $9,000 over 18 months\n\
                     *   Increase retirement contributions by 5%\n\
                     * ok\n";
        assert_eq!(
            extract_advice(reply),
            vec![
                "Here are my recommendations:",
                "Reduce dining out by 30% to save $150 monthly",
                "Create an emergency fund of $9,000 over 18 months",
                "Increase retirement contributions by 5%",
            ]
        );
    }

    #[test]
    fn only_one_bullet_is_stripped() {
        assert_eq!(
            extract_advice("-- Save 10% of every paycheck"),
            Vec::<String>::new()
        );
        assert_eq!(
            extract_advice("•- Save 10% of every paycheck"),
            Vec::<String>::new()
        );
    }

    #[test]
    fn drops_numbered_and_short_lines() {
        let reply = "1. Reduce spending by 10% on groceries\n  Short  \n\r\nAllocate $200 to savings\r\n";
        assert_eq!(extract_advice(reply), vec!["Allocate $200 to savings"]);
    }

    #[test]
    fn non_ascii_capitals_are_dropped() {
        assert!(extract_advice("éviter les dépenses inutiles ce mois").is_empty());
    }

    #[test]
    fn clean_advice_is_a_fixed_point() {
        let clean = vec![
            "Reduce dining expenses by 30% (from $500 to $350)".to_string(),
            "Create an emergency fund of $9,000".to_string(),
            "Increase retirement contributions by 5%".to_string(),
        ];
        assert_eq!(extract_advice(&clean.join("\n")), clean);
    }

    #[test]
    fn fallback_for_surplus() {
        let req = request(
            vec![(-120.0, "Groceries"), (-60.0, "Fuel"), (-30.0, "Fun"), (-10.0, "Misc"), (3000.0, "Salary")],
            1000.0,
            3000.0,
            220.0,
        );
        let metrics = Metrics::compute(&req).unwrap();
        let advice = advice_or_fallback("ok\n\n- no", &req, &metrics);

        assert_eq!(
            advice,
            vec![
                "Create an emergency fund by saving $22.00 monthly until you have 3 months of expenses saved",
                "Reduce expenses by 10% to improve your savings rate",
                "Track your spending in Salary, Groceries, Fuel categories to identify potential savings",
            ]
        );
    }

    #[test]
    fn fallback_for_deficit_uses_the_gap() {
        let req = request(vec![(-2500.0, "Rent")], 500.0, 2000.0, 2500.0);
        let metrics = Metrics::compute(&req).unwrap();
        let advice = fallback_advice(&req, &metrics);

        assert_eq!(advice.len(), 3);
        assert_eq!(advice[1], "Reduce expenses by $500.00 to improve your savings rate");
        assert_eq!(
            advice[2],
            "Track your spending in Rent categories to identify potential savings"
        );
        assert_eq!(advice, fallback_advice(&req, &metrics));
    }

    #[test]
    fn usable_reply_skips_fallback() {
        let req = request(vec![(-10.0, "Rent")], 500.0, 2000.0, 10.0);
        let metrics = Metrics::compute(&req).unwrap();
        let advice = advice_or_fallback("• Allocate $100 to a high-yield account", &req, &metrics);
        assert_eq!(advice, vec!["Allocate $100 to a high-yield account"]);
    }
}
