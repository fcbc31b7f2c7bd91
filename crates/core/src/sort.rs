use crate::summary::ConversationSummary;

/// Sorts summaries so that the most recent latest message comes first.
///
/// Timestamps are compared as instants. The sort is stable, summaries whose
/// latest messages share an instant keep their relative order.
pub fn sort_summaries(summaries: &mut [ConversationSummary]) {
    summaries.sort_by(|a, b| {
        b.latest_message
            .created_at
            .cmp_instant(&a.latest_message.created_at)
    });
}
