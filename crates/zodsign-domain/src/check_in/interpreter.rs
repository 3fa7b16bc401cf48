//! Interpretation of the check-in endpoint's reply.
//!
//! The endpoint answers with a tiny XML document whose root element wraps an
//! HTML fragment in CDATA:
//!
//! ```text
//! <?xml version="1.0" encoding="utf-8"?>
//! <root><![CDATA[ ... <div class="c">恭喜你签到成功!获得随机奖励 酱油 4 瓶. </div> ... ]]></root>
//! ```
//!
//! The fragment is classified by phrase matching. Interpretation never fails:
//! malformed XML and unrecognised text both become [`CheckInOutcome::Unknown`].

use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::value_objects::CheckInOutcome;
use crate::shared::DomainError;

pub const NO_EMBEDDED_TEXT: &str = "no embedded text found";
pub const NO_RECOGNIZABLE_SIGNAL: &str = "no recognizable check-in signal";
pub const ALREADY_CHECKED_IN: &str = "already checked in today, nothing to do";

/// Server phrases recognised in the reply fragment (locale specific)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsePhrases {
    /// Text preceding `<item> <count> <unit>.` on success
    pub success_prefix: String,
    /// Whole phrase meaning "already checked in today"
    pub duplicate: String,
    /// Any of these means the submission was rejected
    pub failure_keywords: Vec<String>,
}

impl Default for ResponsePhrases {
    fn default() -> Self {
        Self {
            success_prefix: "恭喜你签到成功!获得随机奖励".to_string(),
            duplicate: "您今日已经签到，请明天再来！".to_string(),
            failure_keywords: vec![
                "签到失败".to_string(),
                "权限不足".to_string(),
                "参数错误".to_string(),
            ],
        }
    }
}

/// Classifies check-in replies into [`CheckInOutcome`]s
#[derive(Debug, Clone)]
pub struct ResponseInterpreter {
    phrases: ResponsePhrases,
    success: Regex,
    tips: Regex,
}

impl ResponseInterpreter {
    pub fn new(phrases: ResponsePhrases) -> Result<Self, DomainError> {
        let success = Regex::new(&format!(
            r"{}\s+(\S+)\s+([0-9]+)\s+(\S+)\.",
            regex::escape(&phrases.success_prefix)
        ))
        .map_err(|e| DomainError::Configuration(format!("Invalid success phrase: {}", e)))?;

        let tips = Regex::new(r#"(?s)<div class="c">\s*(.+?)\s*</div>"#)
            .map_err(|e| DomainError::Configuration(format!("Invalid tips pattern: {}", e)))?;

        Ok(Self {
            phrases,
            success,
            tips,
        })
    }

    pub fn phrases(&self) -> &ResponsePhrases {
        &self.phrases
    }

    /// Interpret a raw reply body
    pub fn interpret(&self, body: &str) -> CheckInOutcome {
        match extract_root_text(body) {
            Ok(text) => self.classify(&text),
            Err(e) => CheckInOutcome::Unknown {
                message: format!("XML parse failed: {}", e),
            },
        }
    }

    /// Classify an already isolated fragment
    pub fn classify(&self, fragment: &str) -> CheckInOutcome {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return CheckInOutcome::Unknown {
                message: NO_EMBEDDED_TEXT.to_string(),
            };
        }

        let tips = self.tips_text(fragment);

        if let Some(caps) = self.success.captures(fragment) {
            return match caps[2].parse::<u64>() {
                Ok(count) => CheckInOutcome::success(&caps[1], count, &caps[3]),
                Err(_) => CheckInOutcome::Unknown {
                    message: format!("reward count out of range: {}", &caps[2]),
                },
            };
        }

        if fragment.contains(&self.phrases.duplicate) {
            return CheckInOutcome::Duplicate {
                message: ALREADY_CHECKED_IN.to_string(),
            };
        }

        if let Some(keyword) = self
            .phrases
            .failure_keywords
            .iter()
            .find(|k| fragment.contains(k.as_str()))
        {
            return CheckInOutcome::Failed {
                message: tips.unwrap_or_else(|| keyword.clone()),
            };
        }

        CheckInOutcome::Unknown {
            message: NO_RECOGNIZABLE_SIGNAL.to_string(),
        }
    }

    /// Inner text of the `<div class="c">` prompt box, if any
    pub fn tips_text(&self, fragment: &str) -> Option<String> {
        self.tips
            .captures(fragment)
            .map(|caps| caps[1].trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

impl Default for ResponseInterpreter {
    fn default() -> Self {
        Self::new(ResponsePhrases::default()).expect("default phrases are escaped literals")
    }
}

/// Text directly inside the single root element, up to its first child.
///
/// Character data and CDATA sections are concatenated.
pub fn extract_root_text(xml: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(xml);
    let mut depth = 0usize;
    let mut root_seen = false;
    let mut root_closed = false;
    let mut collecting = true;
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => {
                if depth == 0 {
                    if root_seen {
                        return Err("multiple root elements".to_string());
                    }
                    root_seen = true;
                } else if depth == 1 {
                    collecting = false;
                }
                depth += 1;
            }
            Ok(Event::Empty(_)) => {
                if depth == 0 {
                    if root_seen {
                        return Err("multiple root elements".to_string());
                    }
                    root_seen = true;
                    root_closed = true;
                } else if depth == 1 {
                    collecting = false;
                }
            }
            Ok(Event::End(_)) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| "unexpected closing tag".to_string())?;
                if depth == 0 {
                    root_closed = true;
                }
            }
            Ok(Event::Text(e)) => {
                let value = e.unescape().map_err(|e| e.to_string())?;
                if depth == 0 {
                    if !value.trim().is_empty() {
                        return Err("text outside of root element".to_string());
                    }
                } else if depth == 1 && collecting {
                    text.push_str(&value);
                }
            }
            Ok(Event::CData(e)) => {
                if depth == 0 {
                    return Err("CDATA outside of root element".to_string());
                }
                if depth == 1 && collecting {
                    text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(e.to_string()),
        }
    }

    if !root_seen {
        return Err("no root element".to_string());
    }
    if !root_closed {
        return Err("root element is not closed".to_string());
    }

    Ok(text)
}
