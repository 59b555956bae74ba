use std::io::Cursor;
use std::path::Path;

use bikeshare_explorer::ingestion::IngestionOptions;
use bikeshare_explorer::interactive::Prompter;
use bikeshare_explorer::loader::load;
use bikeshare_explorer::registry::{City, DayFilter, MonthFilter};

fn fixtures() -> &'static Path {
    Path::new("tests/fixtures")
}

#[test]
fn scripted_session_filters_and_pages_raw_rows() {
    let input = "new york city\nJune\nall\nyes\nyes\n";
    let mut prompter = Prompter::new(Cursor::new(input), Vec::new());

    let selection = prompter.ask_filters().unwrap();
    assert_eq!(selection.city, City::NewYorkCity);
    assert_eq!(selection.month, MonthFilter::from_name("june").unwrap());
    assert_eq!(selection.day, DayFilter::All);

    let trips = load(fixtures(), &selection, &IngestionOptions::default()).unwrap();
    assert_eq!(trips.row_count(), 2);

    let shown = prompter.page_raw_rows(&trips, 1).unwrap();
    assert_eq!(shown, 2);

    let (_, out) = prompter.into_inner();
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("Would you like to see 1 rows of raw data?"));
    assert!(out.contains("Suffolk St & Stanton St"));
    assert!(out.contains("2017-06-23 15:09:32"));
    assert!(out.contains("No more rows to display."));
}

#[test]
fn invalid_answers_are_reprompted_not_fatal() {
    let input = "Seattle\nwashington\nsmarch\nmarch\nsun\nwednesday\n";
    let mut prompter = Prompter::new(Cursor::new(input), Vec::new());

    let selection = prompter.ask_filters().unwrap();
    let trips = load(fixtures(), &selection, &IngestionOptions::default()).unwrap();
    assert_eq!(trips.row_count(), 1);

    let (_, out) = prompter.into_inner();
    let out = String::from_utf8(out).unwrap();
    assert_eq!(out.matches("Invalid input.").count(), 3);
}
