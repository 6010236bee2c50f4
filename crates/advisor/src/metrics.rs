//! Derived financial figures for an [`AdviceRequest`].

use std::{collections::HashMap, fmt};

use crate::{AdviceRequest, AdvisorError, ResultAdvisor};

/// Number of categories kept in [`Metrics::top_categories`].
pub const TOP_CATEGORIES: usize = 5;

const SAVINGS_RATE_TARGET: f64 = 20.0;
const EMERGENCY_FUND_TARGET_MONTHS: f64 = 3.0;

/// Savings rate as a percentage rounded to one decimal.
///
/// Undefined when there is no income, in which case it displays as `"0"`
/// and compares as zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SavingsRate(Option<f64>);

impl SavingsRate {
    pub fn new(income: f64, expenses: f64) -> Self {
        if income > 0.0 {
            Self(Some(round1((income - expenses) / income * 100.0)))
        } else {
            Self(None)
        }
    }

    /// Percentage value, `0.0` when undefined.
    pub fn value(self) -> f64 {
        self.0.unwrap_or(0.0)
    }
}

impl fmt::Display for SavingsRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(rate) => write!(f, "{rate:.1}"),
            None => f.write_str("0"),
        }
    }
}

/// Warning raised when a figure crosses a recommended threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Insight {
    LowSavingsRate,
    ThinEmergencyFund,
    Overspending,
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Insight::LowSavingsRate => "Your savings rate is below the recommended 20%",
            Insight::ThinEmergencyFund => {
                "Your emergency fund covers less than 3 months of expenses"
            }
            Insight::Overspending => "You are currently spending more than you earn",
        };
        f.write_str(text)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Metrics {
    pub savings_rate: SavingsRate,
    pub monthly_net: f64,
    pub emergency_fund_months: f64,
    /// Absolute spending per trimmed category, in first-seen order.
    pub spending_by_category: Vec<(String, f64)>,
    /// At most [`TOP_CATEGORIES`] entries, highest spending first.
    pub top_categories: Vec<(String, f64)>,
    pub insights: Vec<Insight>,
}

impl Metrics {
    /// Computes the metrics of a validated request.
    ///
    /// Fails with [`AdvisorError::DivisionByZero`] when `expenses` is zero
    /// and with [`AdvisorError::NonFinite`] when a figure overflows.
    pub fn compute(request: &AdviceRequest) -> ResultAdvisor<Self> {
        if request.expenses == 0.0 {
            return Err(AdvisorError::DivisionByZero);
        }

        let savings_rate = SavingsRate::new(request.income, request.expenses);
        let monthly_net = request.income - request.expenses;
        let emergency_fund_months = request.total_balance / request.expenses;

        let spending_by_category = spending_by_category(request);

        let figures = [
            ("savings rate", savings_rate.value()),
            ("monthly net", monthly_net),
            ("emergency fund months", emergency_fund_months),
        ];
        let category_totals = spending_by_category
            .iter()
            .map(|(_, amount)| ("category spending", *amount));
        if let Some((figure, _)) = figures
            .into_iter()
            .chain(category_totals)
            .find(|(_, value)| !value.is_finite())
        {
            return Err(AdvisorError::NonFinite(figure));
        }

        let top_categories = top_categories(&spending_by_category, TOP_CATEGORIES);

        let mut insights = Vec::new();
        if savings_rate.value() < SAVINGS_RATE_TARGET {
            insights.push(Insight::LowSavingsRate);
        }
        if emergency_fund_months < EMERGENCY_FUND_TARGET_MONTHS {
            insights.push(Insight::ThinEmergencyFund);
        }
        if monthly_net < 0.0 {
            insights.push(Insight::Overspending);
        }

        tracing::debug!(
            savings_rate = %savings_rate,
            monthly_net,
            emergency_fund_months,
            categories = spending_by_category.len(),
            insights = insights.len(),
            "computed metrics"
        );

        Ok(Self {
            savings_rate,
            monthly_net,
            emergency_fund_months,
            spending_by_category,
            top_categories,
            insights,
        })
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn spending_by_category(request: &AdviceRequest) -> Vec<(String, f64)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(String, f64)> = Vec::new();

    for t in &request.transactions {
        let category = t.category.trim();
        match index.get(category) {
            Some(&i) => totals[i].1 += t.amount.abs(),
            None => {
                index.insert(category, totals.len());
                totals.push((category.to_string(), t.amount.abs()));
            }
        }
    }

    totals
}

/// Sorts by amount descending. The sort is stable, so ties keep first-seen
/// order.
fn top_categories(spending: &[(String, f64)], limit: usize) -> Vec<(String, f64)> {
    let mut sorted = spending.to_vec();
    sorted.sort_by(|a, b| b.1.total_cmp(&a.1));
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Transaction;

    fn tx(amount: f64, category: &str) -> Transaction {
        Transaction {
            amount,
            category: category.to_string(),
            date: "2024-01-01".to_string(),
        }
    }

    fn request(
        transactions: Vec<Transaction>,
        total_balance: f64,
        income: f64,
        expenses: f64,
    ) -> AdviceRequest {
        AdviceRequest {
            transactions,
            total_balance,
            income,
            expenses,
        }
    }

    #[test]
    fn groceries_and_salary_example() {
        let req = request(
            vec![tx(-120.0, "Groceries"), tx(3000.0, "Salary")],
            1000.0,
            3000.0,
            120.0,
        );
        let metrics = Metrics::compute(&req).unwrap();

        assert_eq!(metrics.savings_rate.to_string(), "96.0");
        assert_eq!(metrics.monthly_net, 2880.0);
        assert!((metrics.emergency_fund_months - 8.333).abs() < 0.001);
        assert_eq!(
            metrics.spending_by_category,
            vec![
                ("Groceries".to_string(), 120.0),
                ("Salary".to_string(), 3000.0)
            ]
        );
        assert_eq!(metrics.top_categories[0], ("Salary".to_string(), 3000.0));
        assert!(metrics.insights.is_empty());
    }

    #[test]
    fn savings_rate_without_income_is_zero() {
        for income in [0.0, -10.0] {
            let rate = SavingsRate::new(income, 50.0);
            assert_eq!(rate.to_string(), "0");
            assert_eq!(rate.value(), 0.0);
        }
    }

    #[test]
    fn savings_rate_rounds_to_one_decimal() {
        let cases = [(3000.0, 2000.0), (700.0, 333.0), (1.0, 3.0), (90.0, 0.3)];
        for (income, expenses) in cases {
            let rate = SavingsRate::new(income, expenses);
            let expected = round1((income - expenses) / income * 100.0);
            assert_eq!(rate.value(), expected);
            assert_eq!(rate.to_string(), format!("{expected:.1}"));
        }
        assert_eq!(SavingsRate::new(3.0, 2.0).to_string(), "33.3");
    }

    #[test]
    fn zero_expenses_is_rejected() {
        let req = request(vec![tx(10.0, "Salary")], 100.0, 10.0, 0.0);
        assert_eq!(Metrics::compute(&req), Err(AdvisorError::DivisionByZero));
    }

    #[test]
    fn tiny_expenses_overflow_emergency_fund() {
        let req = request(vec![tx(-1.0, "Rent")], 1e10, 100.0, 1e-310);
        assert_eq!(
            Metrics::compute(&req),
            Err(AdvisorError::NonFinite("emergency fund months"))
        );
    }

    #[test]
    fn huge_gap_overflows() {
        let req = request(vec![tx(-1.0, "Rent")], 100.0, 1e308, -1e308);
        assert_eq!(
            Metrics::compute(&req),
            Err(AdvisorError::NonFinite("savings rate"))
        );

        let req = request(vec![tx(-1.0, "Rent")], 100.0, -1e308, 1e308);
        assert_eq!(
            Metrics::compute(&req),
            Err(AdvisorError::NonFinite("monthly net"))
        );
    }

    #[test]
    fn overflowing_category_total_is_rejected() {
        let req = request(vec![tx(-1e308, "Rent"), tx(-1e308, "Rent")], 100.0, 10.0, 5.0);
        assert_eq!(
            Metrics::compute(&req),
            Err(AdvisorError::NonFinite("category spending"))
        );
    }

    #[test]
    fn every_insight_fires_independently() {
        let req = request(vec![tx(-900.0, "Rent")], 100.0, 500.0, 900.0);
        let metrics = Metrics::compute(&req).unwrap();
        assert_eq!(
            metrics.insights,
            vec![
                Insight::LowSavingsRate,
                Insight::ThinEmergencyFund,
                Insight::Overspending
            ]
        );

        let req = request(vec![tx(-100.0, "Rent")], 100.0, 1000.0, 100.0);
        let metrics = Metrics::compute(&req).unwrap();
        assert_eq!(metrics.insights, vec![Insight::ThinEmergencyFund]);
    }

    #[test]
    fn category_totals_match_absolute_sum() {
        let txs = vec![
            tx(-10.5, "Food"),
            tx(20.0, " Food "),
            tx(-3.25, "Bills"),
            tx(7.0, "Fun"),
            tx(-1.0, "Bills"),
        ];
        let expected: f64 = txs.iter().map(|t| t.amount.abs()).sum();
        let metrics = Metrics::compute(&request(txs, 1.0, 1.0, 1.0)).unwrap();

        let total: f64 = metrics.spending_by_category.iter().map(|(_, v)| v).sum();
        assert!((total - expected).abs() < 1e-9);
        assert_eq!(metrics.spending_by_category.len(), 3);
        assert_eq!(metrics.spending_by_category[0], ("Food".to_string(), 30.5));
    }

    #[test]
    fn top_categories_are_capped_and_sorted() {
        let txs = (1..=8)
            .map(|i| tx(-(i as f64) * 10.0, &format!("Cat{i}")))
            .collect();
        let metrics = Metrics::compute(&request(txs, 1.0, 1.0, 1.0)).unwrap();

        assert_eq!(metrics.top_categories.len(), TOP_CATEGORIES);
        assert!(
            metrics
                .top_categories
                .windows(2)
                .all(|pair| pair[0].1 >= pair[1].1)
        );
        assert_eq!(metrics.top_categories[0].0, "Cat8");

        let txs = vec![tx(-1.0, "A"), tx(-2.0, "B")];
        let metrics = Metrics::compute(&request(txs, 1.0, 1.0, 1.0)).unwrap();
        assert_eq!(metrics.top_categories.len(), 2);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let txs = vec![tx(-5.0, "Second"), tx(-5.0, "First"), tx(-9.0, "Top")];
        let metrics = Metrics::compute(&request(txs, 1.0, 1.0, 1.0)).unwrap();
        let names: Vec<_> = metrics
            .top_categories
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(names, ["Top", "Second", "First"]);
    }
}
