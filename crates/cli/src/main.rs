use clap::{Parser, Subcommand};
use mras_core::config::{data_dir_from_env_value, password_iterations_from_env_value};
use mras_core::models::{Appointment, Referral};
use mras_core::{CoreConfig, EntityId, Services, StoreBackend};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mras")]
#[command(about = "MRAS referral and appointment CLI")]
struct Cli {
    /// Data directory of the file store (defaults to MRAS_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all hospitals
    Hospitals,
    /// List all referrals
    Referrals,
    /// Approve a referral
    Approve {
        /// Referral id
        id: EntityId,
    },
    /// Reject a referral
    Reject {
        /// Referral id
        id: EntityId,
    },
    /// Mark a referral completed
    Complete {
        /// Referral id
        id: EntityId,
    },
    /// List all appointments
    Appointments,
    /// Cancel an appointment
    Cancel {
        /// Appointment id
        id: EntityId,
    },
}

fn print_referral(referral: &Referral) {
    println!(
        "ID: {}, Patient: {}, From: {}, To: {}, Status: {}, Reason: {}",
        referral.id,
        referral.patient,
        referral.referring_hospital,
        referral.destination_hospital,
        referral.status.as_str(),
        referral.reason
    );
}

fn print_appointment(appointment: &Appointment) {
    println!(
        "ID: {}, Patient: {}, Doctor: {}, Date: {}, Status: {:?}",
        appointment.id,
        appointment.patient,
        appointment.doctor,
        appointment.date.format("%Y-%m-%d %H:%M"),
        appointment.status
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| data_dir_from_env_value(std::env::var("MRAS_DATA_DIR").ok()));
    let iterations =
        password_iterations_from_env_value(std::env::var("MRAS_PASSWORD_ITERATIONS").ok())?;
    let cfg = CoreConfig::new(StoreBackend::File, data_dir, iterations)?;
    let services = Services::new(cfg.open_store().await?, &cfg);

    match cli.command {
        Some(Commands::Hospitals) => match services.hospitals.list_all().await {
            Ok(hospitals) if hospitals.is_empty() => println!("No hospitals found."),
            Ok(hospitals) => {
                for hospital in hospitals {
                    println!(
                        "ID: {}, Name: {}, Location: {}, Status: {:?}, Doctors: {}",
                        hospital.id,
                        hospital.name,
                        hospital.location,
                        hospital.status,
                        hospital.doctors.len()
                    );
                }
            }
            Err(e) => eprintln!("Error listing hospitals: {}", e),
        },
        Some(Commands::Referrals) => match services.referrals.list_all().await {
            Ok(referrals) if referrals.is_empty() => println!("No referrals found."),
            Ok(referrals) => referrals.iter().for_each(print_referral),
            Err(e) => eprintln!("Error listing referrals: {}", e),
        },
        Some(Commands::Approve { id }) => match services.referrals.approve(id).await {
            Ok(referral) => print_referral(&referral),
            Err(e) => eprintln!("Error approving referral: {}", e),
        },
        Some(Commands::Reject { id }) => match services.referrals.reject(id).await {
            Ok(referral) => print_referral(&referral),
            Err(e) => eprintln!("Error rejecting referral: {}", e),
        },
        Some(Commands::Complete { id }) => match services.referrals.complete(id).await {
            Ok(referral) => print_referral(&referral),
            Err(e) => eprintln!("Error completing referral: {}", e),
        },
        Some(Commands::Appointments) => match services.appointments.list_all().await {
            Ok(appointments) if appointments.is_empty() => println!("No appointments found."),
            Ok(appointments) => appointments.iter().for_each(print_appointment),
            Err(e) => eprintln!("Error listing appointments: {}", e),
        },
        Some(Commands::Cancel { id }) => match services.appointments.cancel(id).await {
            Ok(appointment) => print_appointment(&appointment),
            Err(e) => eprintln!("Error canceling appointment: {}", e),
        },
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn referral_commands_take_an_id() {
        let id = EntityId::new();
        let cli = Cli::try_parse_from(["mras", "approve", &id.to_string()]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Approve { id: parsed }) if parsed == id));
    }

    #[test]
    fn malformed_id_is_rejected_by_the_parser() {
        assert!(Cli::try_parse_from(["mras", "cancel", "not-an-id"]).is_err());
    }

    #[test]
    fn data_dir_flag_is_global() {
        let cli = Cli::try_parse_from(["mras", "hospitals", "--data-dir", "/tmp/mras"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/mras")));
        assert!(matches!(cli.command, Some(Commands::Hospitals)));
    }
}
