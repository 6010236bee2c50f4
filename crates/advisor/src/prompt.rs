//! Prompt texts sent to the completion service.

use crate::{AdviceRequest, Metrics, Usd};

/// System prompt for the community assistant.
pub const COMMUNITY_SYSTEM_PROMPT: &str = "\
You are MoreLife, a friendly community AI assistant focused on helping users discover and engage with community events and activities.

Primary Functions:
- Share information about upcoming community events
- Discuss ongoing community activities and programs
- Help users find and join community groups
- Provide details about community meetups and workshops
- Share information about local initiatives and projects
- Guide users to relevant community resources";

/// System prompt for the financial advisor.
pub const ADVISOR_SYSTEM_PROMPT: &str = "You are a financial advisor who provides clear, actionable recommendations. Each recommendation must start with an action verb and include specific numbers or percentages. Focus on practical steps that directly address the client's financial situation.";

const PREAMBLE: &str = "As a financial advisor, analyze this data and provide 3-4 specific, actionable recommendations:";

const INSTRUCTIONS: &str = "\
Please provide 3-4 specific recommendations. Each recommendation should:
1. Start with an action verb (e.g., \"Create\", \"Reduce\", \"Allocate\")
2. Include specific numbers or percentages
3. Focus on practical, actionable steps
4. Address the key financial concerns identified

Format your response as bullet points starting with \"• \" or \"- \".
Example format:
• Reduce dining expenses by 30% (from $500 to $350) by cooking meals at home
• Create an emergency fund by allocating $300 monthly until reaching $9,000
• Increase retirement contributions by 5% to maximize employer match";

/// Renders the user prompt for a financial advice request.
///
/// The category and concern sections are left out when empty.
pub fn render_advice_prompt(request: &AdviceRequest, metrics: &Metrics) -> String {
    let mut lines = vec![
        PREAMBLE.to_string(),
        String::new(),
        "Financial Overview:".to_string(),
        format!("- Total Balance: {}", Usd(request.total_balance)),
        format!("- Monthly Income: {}", Usd(request.income)),
        format!("- Monthly Expenses: {}", Usd(request.expenses)),
        format!("- Monthly Net: {}", Usd(metrics.monthly_net)),
        format!("- Savings Rate: {}%", metrics.savings_rate),
        format!(
            "- Emergency Fund: {:.1} months of expenses",
            metrics.emergency_fund_months
        ),
    ];

    if !metrics.top_categories.is_empty() {
        lines.push(String::new());
        lines.push("Top Spending Categories:".to_string());
        lines.extend(
            metrics
                .top_categories
                .iter()
                .map(|(category, amount)| format!("- {category}: {}", Usd(*amount))),
        );
    }

    if !metrics.insights.is_empty() {
        lines.push(String::new());
        lines.push("Key Concerns:".to_string());
        lines.extend(metrics.insights.iter().map(|insight| format!("- {insight}")));
    }

    lines.push(String::new());
    lines.push(INSTRUCTIONS.to_string());
    lines.join("\n")
}
