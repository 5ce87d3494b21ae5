//! Aspirant news feeds: current affairs, recruitment notices, and
//! dashboard alerts.
//!
//! Same remote seam and decode discipline as question generation. The
//! upstream service historically returned marker-delimited text parsed
//! with regexes; these fetchers instead demand strict JSON arrays and
//! deserialize every record through typed wire shapes before it becomes
//! a domain item.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::source::decode::parse_json;
use crate::source::{RemoteGenerator, SourceUnavailable};

/// One current-affairs headline relevant to the target exams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub category: String,
    pub date: String,
}

/// One active recruitment notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecruitmentNotice {
    pub id: String,
    pub title: String,
    pub organization: String,
    pub deadline: String,
    pub eligibility: String,
    pub link: String,
}

/// Priority class of a dashboard alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertKind {
    Job,
    News,
    Alert,
}

/// One high-priority dashboard alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub kind: AlertKind,
    pub message: String,
    pub timestamp: String,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct NewsRecord {
    title: String,
    summary: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct RecruitmentRecord {
    role: String,
    organization: String,
    #[serde(default)]
    deadline: Option<String>,
    #[serde(default)]
    eligibility: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct NotificationRecord {
    #[serde(rename = "type")]
    kind: AlertKind,
    message: String,
    timestamp: String,
    #[serde(default)]
    link: Option<String>,
}

/// Builds the current-affairs prompt for a given "today" string.
pub fn build_current_affairs_prompt(today: &str) -> String {
    format!(
        "Find the top 6 most important current affairs news headlines and summaries relevant \
         for competitive exams (UPSC, OPSC, OSSSC, Banking) for the last 3 days (up to {today}).\n\
         CRITICAL SOURCES: prioritize updates from 'Odisha TV', 'Sambad English', 'Prameya News', \
         'The Samaja', and official 'Odisha Government Press Releases'.\n\
         CRITICAL CONTENT: ensure at least 2 of the items are specifically related to Odisha state \
         (new government schemes, cabinet decisions, OPSC/OSSSC notifications, state awards, \
         appointments).\n\n\
         OUTPUT FORMAT: return a strict JSON array of objects with fields \"title\" (string), \
         \"summary\" (string), \"category\" (string), and \"date\" (string). No markdown, no \
         surrounding text."
    )
}

/// Builds the recruitment-notifications prompt for a given "today" string.
pub fn build_recruitments_prompt(today: &str) -> String {
    format!(
        "Search for the latest active government and private job recruitment notifications \
         released in the last 14 days (up to {today}).\n\
         OFFICIAL SOURCES MANDATORY: ossc.gov.in (Odisha Staff Selection Commission), \
         upsc.gov.in (Union Public Service Commission), ibps.in (Institute of Banking Personnel \
         Selection), opsc.gov.in and osssc.gov.in (Odisha Public/Sub-ordinate Commissions).\n\
         PRIORITY: list any active notification from OSSC, UPSC, or IBPS found in the last 2 \
         weeks.\n\n\
         OUTPUT FORMAT: return a strict JSON array of objects with fields \"role\" (string), \
         \"organization\" (string), \"deadline\" (string), \"eligibility\" (string), and \
         \"link\" (string, the official URL or \"Search online\"). No markdown, no surrounding \
         text."
    )
}

/// Builds the dashboard-alerts prompt.
pub fn build_notifications_prompt() -> String {
    "Identify 3 critical alerts for an Odisha government exam aspirant right now. Include 1 \
     upcoming deadline (check OSSC/UPSC dates if known), 1 important news event, and 1 general \
     tip.\n\n\
     OUTPUT FORMAT: return a strict JSON array of objects with fields \"type\" (one of \"JOB\", \
     \"NEWS\", \"ALERT\"), \"message\" (string), and \"timestamp\" (string). No markdown, no \
     surrounding text."
        .to_string()
}

fn today() -> String {
    Utc::now().format("%d %B %Y").to_string()
}

/// Fetches and decodes the current-affairs feed. Remote failure or an
/// undecodable payload surfaces as `SourceUnavailable`, same as question
/// resolution.
pub fn fetch_current_affairs(
    generator: &dyn RemoteGenerator,
) -> Result<Vec<NewsItem>, SourceUnavailable> {
    let prompt = build_current_affairs_prompt(&today());
    let payload = generator.generate_json(&prompt).map_err(SourceUnavailable)?;
    let records: Vec<NewsRecord> =
        parse_json(&payload).map_err(|err| SourceUnavailable(err.into()))?;
    Ok(records
        .into_iter()
        .map(|record| NewsItem {
            id: Uuid::new_v4().to_string(),
            title: record.title,
            summary: record.summary,
            category: record.category.unwrap_or_else(|| "General".to_string()),
            date: record.date.unwrap_or_else(|| "Recent".to_string()),
        })
        .collect())
}

/// Fetches and decodes the active recruitment notifications.
pub fn fetch_recruitments(
    generator: &dyn RemoteGenerator,
) -> Result<Vec<RecruitmentNotice>, SourceUnavailable> {
    let prompt = build_recruitments_prompt(&today());
    let payload = generator.generate_json(&prompt).map_err(SourceUnavailable)?;
    let records: Vec<RecruitmentRecord> =
        parse_json(&payload).map_err(|err| SourceUnavailable(err.into()))?;
    Ok(records
        .into_iter()
        .map(|record| RecruitmentNotice {
            id: Uuid::new_v4().to_string(),
            title: record.role,
            organization: record.organization,
            deadline: record.deadline.unwrap_or_else(|| "See details".to_string()),
            eligibility: record.eligibility.unwrap_or_else(|| "N/A".to_string()),
            link: record.link.unwrap_or_else(|| "Search online".to_string()),
        })
        .collect())
}

/// Fetches and decodes the high-priority dashboard alerts.
pub fn fetch_notifications(
    generator: &dyn RemoteGenerator,
) -> Result<Vec<Notification>, SourceUnavailable> {
    let payload = generator
        .generate_json(&build_notifications_prompt())
        .map_err(SourceUnavailable)?;
    let records: Vec<NotificationRecord> =
        parse_json(&payload).map_err(|err| SourceUnavailable(err.into()))?;
    Ok(records
        .into_iter()
        .map(|record| Notification {
            id: Uuid::new_v4().to_string(),
            kind: record.kind,
            message: record.message,
            timestamp: record.timestamp,
            link: record.link,
        })
        .collect())
}
