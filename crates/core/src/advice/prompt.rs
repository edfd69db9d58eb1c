//! Advice prompt rendering
//!
//! The prompt is Japanese, matching the language the advice is expected in.
//! Leads get a probability line and a customer-needs section; contracts do
//! not.

use std::fmt::Write as _;

use resplan_domain::constants::DATE_FORMAT;
use resplan_domain::utils::money::group_thousands;
use resplan_domain::Project;

const NO_DESCRIPTION: &str = "(記載なし)";

/// Render the advice request for `project`.
#[must_use]
pub fn build_advice_prompt(project: &Project) -> String {
    let details = project.details();
    let lead = project.as_lead();
    let project_type = if lead.is_some() { "プレ活動（営業案件）" } else { "受注プロジェクト" };

    let mut prompt = format!(
        "あなたはプロジェクト管理の専門家です。以下の{project_type}について、\
         リスクと課題を分析し、具体的なアドバイスを提供してください。\n\n"
    );

    prompt.push_str("## 案件情報\n");
    let _ = writeln!(prompt, "- 案件名: {}", details.name);
    let _ = writeln!(prompt, "- クライアント: {}", details.client_name);
    let _ = writeln!(prompt, "- 予算: ¥{}", group_thousands(details.estimated_budget));
    let _ = writeln!(
        prompt,
        "- 期間: {} 〜 {}",
        details.start_date.format(DATE_FORMAT),
        details.end_date.format(DATE_FORMAT)
    );
    if let Some(lead) = lead {
        match lead.probability {
            Some(probability) => {
                let _ = writeln!(prompt, "- 確度: {probability}");
            }
            None => prompt.push_str("- 確度: 未設定\n"),
        }
    }

    prompt.push_str("\n## 概要\n");
    let description = details.description.as_deref().filter(|d| !d.trim().is_empty());
    prompt.push_str(description.unwrap_or(NO_DESCRIPTION));
    prompt.push('\n');

    if let Some(needs) = lead.and(details.needs.as_deref()).filter(|n| !n.trim().is_empty()) {
        let _ = write!(prompt, "\n## 顧客ニーズ\n{needs}\n");
    }

    prompt.push('\n');
    let risks = numbered_section("リスク", &details.risks);
    prompt.push_str(risks.as_deref().unwrap_or("リスク: 特になし"));
    prompt.push('\n');

    if let Some(issues) = numbered_section("課題", &details.issues) {
        prompt.push('\n');
        prompt.push_str(&issues);
        prompt.push('\n');
    }

    prompt.push_str(
        "\n---\n\n\
         上記の情報に基づいて、以下の観点からアドバイスをお願いします：\n\
         1. 主要なリスクへの対策\n\
         2. 課題解決のアプローチ\n\
         3. プロジェクト成功のための推奨事項\n\n\
         回答は日本語で、簡潔かつ実用的にお願いします。",
    );
    prompt
}

fn numbered_section(title: &str, items: &[String]) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    let mut section = format!("{title}:");
    for (index, item) in items.iter().enumerate() {
        let _ = write!(section, "\n{}. {item}", index + 1);
    }
    Some(section)
}
