//! Help command handler

/// Handle the help command
pub fn handle_help() -> String {
    "PlayMate Volleyball\n\n\
        events [search]            - List events, optionally filtered by title, location or level\n\
        show <event>               - Poster, map, attendees, waitlist and admin figures\n\
        create key=value ...       - Create an event (title, level, date, start, end, location,\n\
        \x20                            lat, lon, capacity, courts, price, contact,\n\
        \x20                            pay_in_person, waitlist, notes)\n\
        rsvp <event> <name>        - RSVP a player\n\
        checkin <event> <attendee> - Toggle an attendee's check-in\n\
        remove <event> <attendee>  - Remove an attendee\n\
        promote <event>            - Move the first waitlisted player into a free spot\n\
        export <event>             - Write the attendee list as CSV\n\
        quit                       - Leave\n\n\
        Events and attendees can be referenced by the first characters of their id."
        .to_string()
}
