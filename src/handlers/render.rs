//! Plain-text rendering of events for the command front end

use chrono_tz::Tz;
use uuid::Uuid;

use crate::models::{Attendee, Event, EventStats, WaitlistEntry};
use crate::utils::helpers::{format_price, format_range, truncate_text};

/// Leading characters of an id, enough to reference it in commands
pub fn short_id(id: Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}

/// One line in the event list: title, time, and RSVP counter
pub fn event_line(event: &Event, stats: &EventStats, tz: Tz) -> String {
    let mut line = format!(
        "[{}] {} | {} | {} | RSVP {} / {}",
        short_id(event.id),
        truncate_text(&event.title, 40),
        format_range(event.start, event.finish, tz),
        truncate_text(&event.location, 40),
        stats.attendee_count,
        event.capacity
    );
    if event.waitlist_enabled {
        line.push_str(&format!(" | Waitlist: {}", stats.waitlist_length));
    }
    line
}

/// The featured poster block
pub fn render_poster(event: &Event, tz: Tz) -> String {
    let mut out = format!(
        "{}\n{}\n{}\nLevel: {}\nCourts: {} • Capacity: {} • {}\nContact: {}\n",
        event.title,
        format_range(event.start, event.finish, tz),
        event.location,
        event.level,
        event.courts,
        event.capacity,
        format_price(event.price),
        event.contact
    );
    if event.pay_in_person {
        out.push_str("Pay in person (cash / e-transfer on site)\n");
    }
    if !event.notes.is_empty() {
        out.push_str(&format!("Note: {}\n", event.notes));
    }
    out
}

/// Full detail view: poster, map, attendees, waitlist and admin figures
pub fn render_details(
    event: &Event,
    map_url: &str,
    attendees: &[Attendee],
    waitlist: &[WaitlistEntry],
    stats: &EventStats,
    tz: Tz,
) -> String {
    let mut out = render_poster(event, tz);
    out.push_str(&format!("Map: {}\n", map_url));

    out.push_str("\nAttendees:\n");
    if attendees.is_empty() {
        out.push_str("  No RSVPs yet.\n");
    }
    for attendee in attendees {
        let mark = if attendee.checked_in { "x" } else { " " };
        out.push_str(&format!("  [{}] {} {}\n", mark, short_id(attendee.id), attendee.name));
    }

    if event.waitlist_enabled {
        out.push_str("\nWaitlist:\n");
        if waitlist.is_empty() {
            out.push_str("  Empty\n");
        }
        for (position, entry) in waitlist.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", position + 1, entry.name));
        }
    }

    out.push_str(&format!(
        "\nQuick admin:\n  Spots left: {}\n  Check-ins: {}\n  Waitlist: {}\n  Revenue (projected): {}",
        stats.spots_remaining,
        stats.check_in_count,
        stats.waitlist_length,
        format_price(stats.projected_revenue)
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateEventRequest, SkillLevel};
    use chrono::{TimeZone, Utc};

    fn event(waitlist_enabled: bool) -> Event {
        CreateEventRequest {
            title: "Drop-in Volleyball".to_string(),
            level: SkillLevel::Competitive,
            location: "717 Rue Saint-Ferdinand, Montréal".to_string(),
            latitude: 45.4793,
            longitude: -73.5699,
            start: Utc.with_ymd_and_hms(2025, 10, 5, 22, 0, 0).unwrap(),
            finish: Utc.with_ymd_and_hms(2025, 10, 6, 0, 0, 0).unwrap(),
            capacity: 24,
            courts: 3,
            price: 12.0,
            contact: "514-241-0316".to_string(),
            pay_in_person: true,
            waitlist_enabled,
            notes: "Bring clean indoor shoes.".to_string(),
        }
        .into_event()
    }

    fn stats(attendee_count: usize, waitlist_length: usize) -> EventStats {
        EventStats {
            capacity: 24,
            attendee_count,
            waitlist_length,
            spots_remaining: 24 - attendee_count,
            check_in_count: 0,
            projected_revenue: attendee_count as f64 * 12.0,
        }
    }

    #[test]
    fn test_short_id() {
        let id = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        assert_eq!(short_id(id), "67e55044");
    }

    #[test]
    fn test_poster_lines() {
        let poster = render_poster(&event(true), chrono_tz::America::Toronto);
        assert!(poster.contains("Sun, Oct 5, 2025 • 18:00–20:00"));
        assert!(poster.contains("Level: Competitive (4-2/5-1)"));
        assert!(poster.contains("Courts: 3 • Capacity: 24 • $12"));
        assert!(poster.contains("Pay in person"));
        assert!(poster.contains("Note: Bring clean indoor shoes."));
    }

    #[test]
    fn test_event_line_shows_waitlist_only_when_enabled() {
        let tz = chrono_tz::America::Toronto;
        assert!(event_line(&event(true), &stats(3, 1), tz).ends_with("RSVP 3 / 24 | Waitlist: 1"));
        assert!(event_line(&event(false), &stats(3, 0), tz).ends_with("RSVP 3 / 24"));
    }

    #[test]
    fn test_details_for_empty_event() {
        let details = render_details(&event(true), "https://example.org", &[], &[], &stats(0, 0), chrono_tz::UTC);
        assert!(details.contains("No RSVPs yet."));
        assert!(details.contains("Waitlist:\n  Empty"));
        assert!(details.contains("Spots left: 24"));
        assert!(details.ends_with("Revenue (projected): $0"));
    }
}
