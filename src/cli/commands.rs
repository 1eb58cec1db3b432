use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cardstudio")]
#[command(version, about = "Order, design, assign and share business cards")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new card studio in the current directory
    Init,

    /// Show the panel for a role
    View {
        /// Role to view (company, designer, hr, employee)
        #[arg(value_name = "ROLE", default_value = "company")]
        role: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Place a design order (company)
    Order {
        /// Company name
        company: String,

        /// Brand details for the designer
        details: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Submit a design template for an order (designer)
    Design {
        /// Order ID
        order_id: i64,

        /// Design template
        template: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Assign a card from a design to an employee (HR)
    Assign {
        /// Design ID
        design_id: i64,

        /// Employee name
        #[arg(long, default_value = "")]
        name: String,

        /// Employee email
        #[arg(long, default_value = "")]
        email: String,

        /// Employee phone
        #[arg(long, default_value = "")]
        phone: String,

        /// Job title
        #[arg(long, default_value = "")]
        title: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the share code of a card (employee)
    Share {
        /// Card ID
        card_id: i64,
    },

    /// Receive a card by its share code
    Receive {
        /// Share code; read from stdin when omitted and stdin is piped
        code: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find a design by its share code
    Lookup {
        /// Share code
        code: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change the theme
    Theme {
        /// light, dark or toggle
        mode: Option<String>,
    },
}
