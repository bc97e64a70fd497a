//! Static response corpora used across harnesses.
//!
//! Each corpus is a `&'static [&'static str]` of representative responses in
//! one shape, as a generative backend actually returns them. The high-volume
//! helpers build large inputs at test time for throughput paths.

/// Bare JSON arrays, accepted by the direct strategy.
pub const CORPUS_DIRECT: &[&str] = &[
    r#"[{"時間":"14:00","事件":"迎賓","備註":"準時開始"}]"#,
    r#"[{"時間":"14:00-14:30","事件":"賓客入場","備註":"播放輕音樂"},{"時間":"14:30","事件":"證婚","備註":""}]"#,
    r#"[{"time":"18:00","event":"Doors open","note":"Coat check on the left"},{"time":"18:30","event":"Dinner","note":"Vegetarian option at table 4"}]"#,
    "\n  [\n    {\"時間\": \"開場前\", \"事件\": \"彩排\", \"備註\": \"音控確認\", \"負責人\": \"主持人\"}\n  ]\n",
];

/// JSON arrays wrapped in a fenced code block with commentary around them.
pub const CORPUS_FENCED: &[&str] = &[
    "以下是為您規劃的婚禮流程：\n```json\n[{\"時間\":\"15:00\",\"事件\":\"敬酒\",\"備註\":\"\"}]\n```\n如需調整請告訴我。",
    "```\n[{\"time\":\"09:00\",\"event\":\"Registration\",\"note\":\"Badges at desk\"}]\n```",
    "Sure! Here is the rundown.\n\n```JSON\n[\n  {\"時間\": \"17:00\", \"事件\": \"晚宴開始\", \"備註\": \"燈光轉暗\"},\n  {\"時間\": \"17:20\", \"事件\": \"成長影片\", \"備註\": \"投影機待命\"}\n]\n```\n\nLet me know if you need changes.",
];

/// Markdown-style tables with varying header wording and column order.
pub const CORPUS_TABULAR: &[&str] = &[
    "| 時間 | 事件 | 備註 |\n|---|---|---|\n| 16:00 | 切蛋糕 | 拍照留念 |",
    "以下為流程表：\n\n| 時段 | 流程 | 建議內容 |\n|:---:|:---|:---|\n| 10:00 | 新娘梳化 | 預留一小時 |\n| 11:00 | 迎娶 | 準備紅包 |\n| 12:00 | 午宴 | |\n\n祝婚禮順利！",
    "| Note | Time | Event |\n| --- | --- | --- |\n| Mic check | 19:00 | Speeches |\n| Lights up | 19:30 | First dance |",
    "｜時間｜活動｜說明｜\n｜－－｜－－｜－－｜\n｜20:00｜送客｜準備喜糖｜",
];

/// Responses no strategy can understand.
pub const CORPUS_UNRECOGNIZED: &[&str] = &[
    "抱歉，我無法提供這個流程。",
    r#"[{"時間":"14:00","事件":"迎賓"}]"#,
    "| 時間 | 事件 |\n|---|---|\n| 16:00 | 切蛋糕 |",
    "| 時間 | 事件 | 備註 |\n|---|---|---|",
    "```json\n{\"schedule\": []}\n```",
    "[]",
];

/// A table of `n` rows with an ordinary header.
pub fn corpus_large_table(n: usize) -> String {
    let mut out = String::from("| 時間 | 事件 | 備註 |\n|---|---|---|\n");
    for i in 0..n {
        out.push_str(&format!(
            "| {:02}:{:02} | 事件 {i} | 備註 {i} |\n",
            i / 60 % 24,
            i % 60
        ));
    }
    out
}

/// A JSON array of `n` records.
pub fn corpus_large_array(n: usize) -> String {
    let items: Vec<serde_json::Value> = (0..n)
        .map(|i| {
            serde_json::json!({
                "時間": format!("{:02}:{:02}", i / 60 % 24, i % 60),
                "事件": format!("事件 {i}"),
                "備註": format!("備註 {i}"),
            })
        })
        .collect();
    serde_json::Value::Array(items).to_string()
}
