use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use contacts_core::{
    Clock, Contact, ContactFields, ContactId, ContactService, CoreConfig, DatabaseLocation,
    FixedClock, ListDefaults, OwnerId, SqliteContactStore, SystemClock,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "contacts")]
#[command(about = "Contacts database CLI")]
struct Cli {
    /// SQLite database file (`:memory:` for a throwaway database)
    #[arg(long, default_value = "contacts.db")]
    db: PathBuf,
    /// Owner whose contacts are managed
    #[arg(long, default_value_t = 1)]
    owner: i64,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List contacts
    List {
        #[arg(long)]
        skip: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one contact
    Show { id: i64 },
    /// Add a contact
    Add {
        first_name: String,
        last_name: String,
        email: String,
        phone: String,
        /// Birthday (YYYY-MM-DD)
        birthday: String,
        /// Free-form notes
        #[arg(long)]
        info: Option<String>,
    },
    /// Delete a contact
    Delete { id: i64 },
    /// Contacts with a birthday in the next 8 days
    Birthdays {
        /// Override today's date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },
}

fn print_contact(contact: &Contact) {
    let f = &contact.fields;
    println!(
        "ID: {}, Name: {} {}, Email: {}, Phone: {}, Birthday: {}",
        contact.id, f.first_name, f.last_name, f.email, f.phone, f.birthday
    );
    if let Some(info) = &f.additional_info {
        println!("    {}", info);
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{}': {}", value, e).into())
}

fn service(db: PathBuf, clock: Arc<dyn Clock>) -> Result<ContactService, Box<dyn std::error::Error>> {
    let location = DatabaseLocation::from_env_value(db.to_str().map(str::to_owned));
    let cfg = Arc::new(CoreConfig::new(location, ListDefaults::default())?);
    let store = SqliteContactStore::open(cfg.database())?;
    Ok(ContactService::new(cfg, Arc::new(store), clock))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let owner = OwnerId::new(cli.owner);

    let Some(command) = cli.command else {
        println!("Use 'contacts --help' for commands");
        return Ok(());
    };

    let clock: Arc<dyn Clock> = match &command {
        Commands::Birthdays { today: Some(today) } => Arc::new(FixedClock::new(parse_date(today)?)),
        _ => Arc::new(SystemClock),
    };
    let contacts = service(cli.db, clock)?;

    match command {
        Commands::List { skip, limit } => {
            let list = contacts.list(skip, limit, owner)?;
            if list.is_empty() {
                println!("No contacts found.");
            }
            for contact in &list {
                print_contact(contact);
            }
        }
        Commands::Show { id } => match contacts.get_by_id(ContactId::new(id), owner)? {
            Some(contact) => print_contact(&contact),
            None => eprintln!("Contact not found"),
        },
        Commands::Add {
            first_name,
            last_name,
            email,
            phone,
            birthday,
            info,
        } => {
            let fields = ContactFields {
                first_name,
                last_name,
                email,
                phone,
                birthday: parse_date(&birthday)?,
                additional_info: info,
            };
            let contact = contacts.create(fields, owner)?;
            println!("Created contact with ID: {}", contact.id);
        }
        Commands::Delete { id } => match contacts.delete(ContactId::new(id), owner)? {
            Some(contact) => println!("Deleted contact with ID: {}", contact.id),
            None => eprintln!("Contact not found"),
        },
        Commands::Birthdays { .. } => {
            let upcoming = contacts.upcoming_birthdays(owner)?;
            if upcoming.is_empty() {
                println!("No upcoming birthdays.");
            }
            for contact in &upcoming {
                print_contact(contact);
            }
        }
    }

    Ok(())
}
