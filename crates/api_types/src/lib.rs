use serde::{Deserialize, Serialize};

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

pub mod chat {
    use super::*;

    /// Body accepted by `POST /api/chat`.
    ///
    /// The `type` field selects the operation. A body without `type` is a
    /// community chat message.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(tag = "type")]
    pub enum ChatRequest {
        #[serde(rename = "community-chat")]
        CommunityChat { message: String },
        #[serde(rename = "financial-advice")]
        FinancialAdvice(crate::advice::FinancialAdviceRequest),
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ChatReply {
        pub reply: String,
    }
}

pub mod advice {
    use std::fmt;

    use serde::{
        Deserializer, Serializer,
        de::{MapAccess, Visitor},
        ser::SerializeMap,
    };

    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct TransactionInput {
        pub amount: f64,
        pub category: String,
        pub date: String,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct FinancialAdviceRequest {
        pub transactions: Vec<TransactionInput>,
        pub total_balance: f64,
        pub income: f64,
        pub expenses: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AdviceResponse {
        pub advice: Vec<String>,
        pub metrics: MetricsView,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MetricsView {
        /// Percentage with one decimal (`"96.0"`), or `"0"` without income.
        pub savings_rate: String,
        pub monthly_net: f64,
        pub emergency_fund_months: f64,
        pub top_categories: CategoryTotals,
        pub insights: Vec<String>,
    }

    /// Category totals serialized as a JSON object whose keys keep the
    /// order of the underlying list (highest spending first).
    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct CategoryTotals(pub Vec<(String, f64)>);

    impl CategoryTotals {
        pub fn get(&self, category: &str) -> Option<f64> {
            self.0
                .iter()
                .find_map(|(name, amount)| (name == category).then_some(*amount))
        }

        pub fn len(&self) -> usize {
            self.0.len()
        }
    }

    impl Serialize for CategoryTotals {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.0.len()))?;
            for (category, amount) in &self.0 {
                map.serialize_entry(category, amount)?;
            }
            map.end()
        }
    }

    impl<'de> Deserialize<'de> for CategoryTotals {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            struct TotalsVisitor;

            impl<'de> Visitor<'de> for TotalsVisitor {
                type Value = CategoryTotals;

                fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                    f.write_str("a map of category to amount")
                }

                fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                    let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                    while let Some((category, amount)) = access.next_entry::<String, f64>()? {
                        entries.push((category, amount));
                    }
                    Ok(CategoryTotals(entries))
                }
            }

            deserializer.deserialize_map(TotalsVisitor)
        }
    }
}
