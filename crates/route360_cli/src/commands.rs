//! Command handlers.

use crate::cli::{Cli, Commands, CountryCommands, TripCommands, TripFields};
use chrono::Local;
use log::info;
use route360_core::db::open_db;
use route360_core::geo::{CentroidState, FileCentroidSource};
use route360_core::model::trip::parse_date;
use route360_core::repo::KvAccountRepository;
use route360_core::{
    default_log_level, init_logging, map_points, AccountService, ItineraryDraft, JournalSession,
    KeyValueStore, MarkerPoint, MarkerSink, PlaceSelection, Registration, SqliteKeyValueStore,
    StorageScope, Trip, TripDraft, User,
};
use std::error::Error;
use std::path::{Path, PathBuf};

pub type CliResult<T> = Result<T, Box<dyn Error>>;

pub fn run(cli: Cli) -> CliResult<()> {
    if let Some(dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        let dir = absolute(dir)?;
        init_logging(level, &dir.to_string_lossy())?;
    }

    let conn = open_db(&cli.db)?;
    let store = SqliteKeyValueStore::new(&conn);
    let accounts = AccountService::new(KvAccountRepository::new(&store));
    info!("event=cli_command module=cli status=start db={}", cli.db.display());

    match cli.command {
        Commands::Register {
            name,
            email,
            password,
        } => {
            let user = accounts.register(Registration {
                name,
                email,
                password,
            })?;
            println!("registered and signed in as {} <{}>", user.name, user.email);
        }
        Commands::Login { email, password } => {
            let user = accounts.sign_in(&email, &password)?;
            println!("signed in as {}", accounts.display_name(Some(&user))?);
        }
        Commands::Logout => {
            accounts.sign_out()?;
            println!("signed out");
        }
        Commands::Whoami { set_name } => {
            let user = accounts.current_user()?;
            if let (Some(user), Some(name)) = (&user, set_name) {
                accounts.set_display_name(user, &name)?;
            }
            let name = accounts.display_name(user.as_ref())?;
            match user {
                Some(user) => println!("{name} <{}>", user.email),
                None => println!("{name}"),
            }
        }
        Commands::Trip { action } => {
            let user = accounts.require_current_user()?;
            run_trip(&store, &user, action)?;
        }
        Commands::Country { action } => {
            let user = accounts.require_current_user()?;
            run_country(&store, &user, action)?;
        }
        Commands::Markers => {
            let user = accounts.require_current_user()?;
            let source = cli.centroids.map(|payload| match cli.centroid_names {
                Some(names) => FileCentroidSource::with_names(payload, names),
                None => FileCentroidSource::new(payload),
            });
            run_markers(&store, &user, source.as_ref())?;
        }
    }
    Ok(())
}

fn run_trip<S: KeyValueStore>(store: &S, user: &User, action: TripCommands) -> CliResult<()> {
    let mut journal = JournalSession::open(store, &StorageScope::for_user(&user.id))?;
    match action {
        TripCommands::Add(fields) => {
            let draft = fields.apply_to(TripDraft::default())?;
            let trip = journal.create_trip(draft)?;
            println!("{}", trip.id);
        }
        TripCommands::List => {
            let trips = journal.trips().list_trips()?;
            for trip in &trips {
                println!("{}\t{}\t{}", trip.id, trip.title, date_range(trip));
            }
            let summary = journal.trips().summary(Local::now().date_naive())?;
            println!("{} trips, {} upcoming", summary.total, summary.upcoming);
        }
        TripCommands::Show { id } => print_trip(&journal.trips().get_trip(&id)?),
        TripCommands::Edit { id, fields } => {
            let current = journal.trips().get_trip(&id)?;
            let draft = fields.apply_to(draft_of(&current))?;
            journal.update_trip(&id, draft)?;
            println!("updated {id}");
        }
        TripCommands::Delete { id } => {
            journal.delete_trip(&id)?;
            println!("deleted {id}");
        }
        TripCommands::ItineraryAdd {
            trip_id,
            title,
            date,
            note,
        } => {
            let date = parse_date(date.as_deref().unwrap_or_default())?;
            let item = journal
                .trips()
                .add_itinerary_item(&trip_id, ItineraryDraft { title, date, note })?;
            println!("{}", item.id);
        }
        TripCommands::LocationAdd {
            trip_id,
            label,
            lat,
            lng,
        } => {
            let location = journal
                .trips()
                .add_location(&trip_id, PlaceSelection { label, lat, lng })?;
            println!("{}", location.id);
        }
    }
    Ok(())
}

fn run_country<S: KeyValueStore>(store: &S, user: &User, action: CountryCommands) -> CliResult<()> {
    let mut journal = JournalSession::open(store, &StorageScope::for_user(&user.id))?;
    match action {
        CountryCommands::List => {}
        CountryCommands::Add { name } => {
            if !journal.globe_mut().add_country(&name)? {
                println!("already listed: {}", name.trim());
            }
        }
        CountryCommands::Remove { name } => {
            if journal.globe_mut().remove_country(&name)? == 0 {
                println!("not listed: {}", name.trim());
            }
        }
    }
    for entry in journal.globe().visited() {
        let source = if entry.is_manual() { "manual" } else { "trip" };
        println!("{}\t{source}", entry.name);
    }
    Ok(())
}

fn run_markers<S: KeyValueStore>(
    store: &S,
    user: &User,
    centroids: Option<&FileCentroidSource>,
) -> CliResult<()> {
    let mut journal = JournalSession::open(store, &StorageScope::for_user(&user.id))?;
    if let Some(source) = centroids {
        journal.globe_mut().load_centroids(source);
        if matches!(journal.globe().centroid_state(), CentroidState::Failed) {
            eprintln!("centroid data unavailable; using built-in coordinates");
        }
    }
    journal.globe().render_to(&mut StdoutMarkers);
    Ok(())
}

struct StdoutMarkers;

impl MarkerSink for StdoutMarkers {
    fn render(&mut self, markers: &[MarkerPoint], label: &dyn Fn(&str) -> String) {
        for marker in markers {
            println!(
                "{}\t{:.4}\t{:.4}",
                label(&marker.name),
                marker.lat,
                marker.lng
            );
        }
    }
}

impl TripFields {
    /// Overlays the given flags on `draft`; an empty date or country clears it.
    fn apply_to(self, mut draft: TripDraft) -> CliResult<TripDraft> {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(desc) = self.desc {
            draft.desc = desc;
        }
        if let Some(start) = self.start {
            draft.start = parse_date(&start)?;
        }
        if let Some(end) = self.end {
            draft.end = parse_date(&end)?;
        }
        if let Some(cover) = self.cover {
            draft.cover_image = cover;
        }
        if let Some(country) = self.country {
            let trimmed = country.trim();
            draft.country = (!trimmed.is_empty()).then(|| trimmed.to_string());
        }
        Ok(draft)
    }
}

fn draft_of(trip: &Trip) -> TripDraft {
    TripDraft {
        title: trip.title.clone(),
        desc: trip.desc.clone(),
        start: trip.start,
        end: trip.end,
        cover_image: trip.cover_image.clone(),
        country: trip.country.clone(),
    }
}

fn print_trip(trip: &Trip) {
    println!("{}", trip.title);
    println!("id: {}", trip.id);
    println!("dates: {}", date_range(trip));
    if let Some(country) = &trip.country {
        println!("country: {country}");
    }
    if !trip.desc.is_empty() {
        println!("{}", trip.desc);
    }
    for item in &trip.itinerary {
        let day = item
            .day
            .map(|day| format!("day {day}"))
            .unwrap_or_else(|| "unscheduled".to_string());
        println!("  [{day}] {} {}", item.title, item.note);
    }
    for point in map_points(trip) {
        println!("  @ {} ({:.4}, {:.4})", point.label, point.lat, point.lng);
    }
}

fn date_range(trip: &Trip) -> String {
    let show = |date: Option<chrono::NaiveDate>| {
        date.map(|date| date.to_string())
            .unwrap_or_else(|| "?".to_string())
    };
    format!("{} - {}", show(trip.start), show(trip.end))
}

fn absolute(dir: &Path) -> CliResult<PathBuf> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(dir))
}
