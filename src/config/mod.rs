pub mod roster_file;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

#[cfg(feature = "cli")]
mod cli {
    use crate::domain::model::AllocationRequest;
    use crate::utils::error::Result;
    use crate::utils::validation::{
        parse_flag, validate_non_empty_string, validate_positive_number, validate_required_field,
        Validate,
    };
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "group-distributor")]
    #[command(about = "Distribute a roster of students into balanced groups")]
    pub struct CliConfig {
        /// Number of groups to create
        pub groups: Option<usize>,

        /// Number of groups to create, in flag form
        #[arg(long = "groups", value_name = "N", conflicts_with = "groups")]
        pub groups_flag: Option<usize>,

        /// Roster file (.toml or .csv)
        #[arg(long, default_value = "roster.toml")]
        pub roster: String,

        /// Group name prefix; groups are named <prefix>1..<prefix>N
        #[arg(short = 'n', long)]
        pub prefix: String,

        /// Balance by gender: 1, 0, true or false
        #[arg(short = 'g', long, default_value = "0")]
        pub gender: String,

        /// Balance by nationality: 1, 0, true or false
        #[arg(short = 't', long, default_value = "0")]
        pub nationality: String,

        /// Shuffle seed; defaults to the current time in seconds
        #[arg(long)]
        pub seed: Option<u64>,

        /// Only show the allocation, do not create groups
        #[arg(long)]
        pub dry_run: bool,

        #[arg(long, help = "Print the created groups as JSON")]
        pub output_json: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub log_json: bool,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl CliConfig {
        pub fn group_count(&self) -> Option<usize> {
            self.groups.or(self.groups_flag)
        }

        pub fn to_request(&self) -> Result<AllocationRequest> {
            let group_count = *validate_required_field("groups", &self.group_count())?;
            Ok(AllocationRequest::new(group_count, self.prefix.clone())?
                .balance_by_gender(parse_flag("gender", &self.gender)?)
                .balance_by_nationality(parse_flag("nationality", &self.nationality)?))
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_non_empty_string("roster", &self.roster)?;
            validate_non_empty_string("prefix", &self.prefix)?;
            let group_count = *validate_required_field("groups", &self.group_count())?;
            validate_positive_number("groups", group_count, 1)?;
            parse_flag("gender", &self.gender)?;
            parse_flag("nationality", &self.nationality)?;
            Ok(())
        }
    }

}
