use anyhow::{Context, Result};
use chrono::NaiveDate;
use rapport_application::NoteAggregationService;
use rapport_core::note::{AggregationOutcome, Note};
use rapport_core::text::reflow_sentences;

#[derive(Debug, Clone, Copy, Default)]
pub struct NotesOptions {
    pub json: bool,
    pub reflow: bool,
}

pub async fn run(
    service: &NoteAggregationService,
    subject_id: &str,
    date: NaiveDate,
    options: NotesOptions,
) -> Result<()> {
    let outcome = service
        .fetch_with_report(subject_id, date)
        .await
        .with_context(|| format!("Failed to load notes for {} on {}", subject_id, date))?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&outcome.collection)?);
    } else {
        print!("{}", render(&outcome, options.reflow));
    }
    Ok(())
}

/// Plain-text listing of a collection followed by any caveats.
fn render(outcome: &AggregationOutcome, reflow: bool) -> String {
    let collection = &outcome.collection;
    let mut out = String::new();

    out.push_str(&format!("Conversation ({})\n", collection.conversation_notes.len()));
    for note in &collection.conversation_notes {
        out.push_str(&render_note(note, reflow));
    }

    out.push_str(&format!("\nStatus ({})\n", collection.status_notes.len()));
    for note in &collection.status_notes {
        out.push_str(&render_note(note, reflow));
    }

    let report = &outcome.report;
    if report.is_degraded() {
        out.push_str("\n! AI transcripts were unavailable; showing structured notes only\n");
    }
    if report.fallback_timestamps > 0 {
        out.push_str(&format!(
            "\n! {} note(s) had unreadable timestamps and may be out of order\n",
            report.fallback_timestamps
        ));
    }
    out
}

fn render_note(note: &Note, reflow: bool) -> String {
    let stamp = note.timestamp.format("%Y-%m-%d %H:%M");
    if reflow {
        let body = reflow_sentences(&note.text).replace('\n', "\n    ");
        format!("  [{}] {}:\n    {}\n", stamp, note.author, body)
    } else {
        format!("  [{}] {}\n", stamp, note.display_line())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rapport_core::note::{AggregationReport, NoteCollection};

    fn outcome(report: AggregationReport) -> AggregationOutcome {
        AggregationOutcome {
            collection: NoteCollection {
                subject_id: "client-1".to_string(),
                conversation_notes: vec![Note::machine(
                    "Follow up. Send deck!",
                    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
                )],
                status_notes: vec![],
            },
            report,
        }
    }

    #[test]
    fn test_render_plain() {
        let text = render(
            &outcome(AggregationReport {
                transcripts_available: true,
                annotations_extracted: 1,
                fallback_timestamps: 0,
            }),
            false,
        );
        assert!(text.contains("  [2024-01-01 12:00] AI: Follow up. Send deck!\n"));
        assert!(text.contains("Status (0)"));
        assert!(!text.contains("unavailable"));
        assert!(!text.contains("unreadable timestamps"));
    }

    #[test]
    fn test_render_reflow_and_caveats() {
        let text = render(
            &outcome(AggregationReport {
                transcripts_available: false,
                annotations_extracted: 0,
                fallback_timestamps: 2,
            }),
            true,
        );
        assert!(text.contains("AI:\n    Follow up.\n    \n    Send deck!\n"));
        assert!(text.contains("transcripts were unavailable"));
        assert!(text.contains("2 note(s) had unreadable timestamps"));
    }
}
