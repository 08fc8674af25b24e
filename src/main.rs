use bankbridge::application::identity::IdentityClientFactory;
use bankbridge::application::payments::PaymentsGateway;
use bankbridge::config::{Environment, IdentityConfig, PaymentsConfig};
use bankbridge::domain::customer::NewCustomer;
use bankbridge::domain::transfer::{Amount, TransferParams};
use bankbridge::infrastructure::http_payments::HttpPaymentsTransport;
use bankbridge::interfaces::cookies::jar_from_header;
use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result, miette};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    payments: PaymentsArgs,

    #[command(flatten)]
    identity: IdentityArgs,
}

#[derive(Args)]
struct PaymentsArgs {
    /// Payments network deployment mode: `sandbox` or `production`
    #[arg(long, env = "DWOLLA_ENV", global = true)]
    dwolla_env: Option<String>,

    #[arg(long, env = "DWOLLA_KEY", hide_env_values = true, global = true)]
    dwolla_key: Option<String>,

    #[arg(long, env = "DWOLLA_SECRET", hide_env_values = true, global = true)]
    dwolla_secret: Option<String>,

    /// Overrides the host picked by the deployment mode
    #[arg(long, env = "DWOLLA_BASE_URL", global = true)]
    dwolla_base_url: Option<String>,
}

#[derive(Args)]
struct IdentityArgs {
    #[arg(long, env = "APPWRITE_ENDPOINT", global = true)]
    appwrite_endpoint: Option<String>,

    #[arg(long, env = "APPWRITE_PROJECT", global = true)]
    appwrite_project: Option<String>,

    #[arg(long, env = "APPWRITE_KEY", hide_env_values = true, global = true)]
    appwrite_key: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Create a customer from a JSON file of customer fields
    CreateCustomer { file: PathBuf },

    /// Create an on-demand authorization and print its links
    OnDemandAuthorization,

    /// Authorize and link a bank account to a customer
    AddFundingSource {
        #[arg(long)]
        customer_id: String,
        #[arg(long)]
        processor_token: String,
        #[arg(long)]
        bank_name: String,
    },

    /// Transfer USD between two funding sources
    Transfer {
        #[arg(long)]
        source: String,
        #[arg(long)]
        destination: String,
        #[arg(long)]
        amount: Amount,
    },

    /// Print the account behind a session cookie
    Whoami {
        /// Raw `Cookie` header value
        #[arg(long, default_value = "")]
        cookie: String,
    },

    /// Look up a user with the administrator key
    GetUser { user_id: String },
}

impl PaymentsArgs {
    fn gateway(&self) -> Result<PaymentsGateway> {
        let environment = self
            .dwolla_env
            .as_deref()
            .ok_or_else(|| miette!("DWOLLA_ENV must be set"))?;
        let key = self
            .dwolla_key
            .clone()
            .ok_or_else(|| miette!("DWOLLA_KEY must be set"))?;
        let secret = self
            .dwolla_secret
            .clone()
            .ok_or_else(|| miette!("DWOLLA_SECRET must be set"))?;

        let mut config = PaymentsConfig::new(environment, key, secret).into_diagnostic()?;
        if let Some(base_url) = &self.dwolla_base_url {
            config = config.with_base_url(base_url);
        }
        let transport = HttpPaymentsTransport::new(config).into_diagnostic()?;
        Ok(PaymentsGateway::new(Box::new(transport)))
    }
}

impl IdentityArgs {
    fn factory(&self) -> Result<IdentityClientFactory> {
        let project = self
            .appwrite_project
            .clone()
            .ok_or_else(|| miette!("APPWRITE_PROJECT must be set"))?;

        let mut config = IdentityConfig::new(project);
        if let Some(endpoint) = &self.appwrite_endpoint {
            config = config.with_endpoint(endpoint);
        }
        if let Some(key) = &self.appwrite_key {
            config = config.with_api_key(key);
        }
        Ok(IdentityClientFactory::from_config(config))
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let Cli {
        command,
        payments,
        identity,
    } = Cli::parse();
    init_tracing();

    // An invalid deployment mode is fatal whatever the command.
    if let Some(environment) = &payments.dwolla_env {
        environment.parse::<Environment>().into_diagnostic()?;
    }

    match command {
        Command::CreateCustomer { file } => {
            let gateway = payments.gateway()?;
            let reader = BufReader::new(File::open(file).into_diagnostic()?);
            let customer: NewCustomer = serde_json::from_reader(reader).into_diagnostic()?;
            let location = gateway.create_customer(&customer).await.into_diagnostic()?;
            println!("{location}");
        }
        Command::OnDemandAuthorization => {
            let gateway = payments.gateway()?;
            let links = gateway
                .create_on_demand_authorization()
                .await
                .into_diagnostic()?;
            println!("{}", serde_json::to_string_pretty(&links).into_diagnostic()?);
        }
        Command::AddFundingSource {
            customer_id,
            processor_token,
            bank_name,
        } => {
            let gateway = payments.gateway()?;
            let location = gateway
                .add_funding_source_with_authorization(&customer_id, &processor_token, &bank_name)
                .await
                .into_diagnostic()?;
            println!("{location}");
        }
        Command::Transfer {
            source,
            destination,
            amount,
        } => {
            let gateway = payments.gateway()?;
            let params = TransferParams {
                source_funding_source_url: source,
                destination_funding_source_url: destination,
                amount,
            };
            let location = gateway.create_transfer(&params).await.into_diagnostic()?;
            println!("{location}");
        }
        Command::Whoami { cookie } => {
            let factory = identity.factory()?;
            let client = factory
                .create_session_client(&jar_from_header(&cookie))
                .into_diagnostic()?;
            let account = client.account().get().await.into_diagnostic()?;
            println!("{}", serde_json::to_string_pretty(&account).into_diagnostic()?);
        }
        Command::GetUser { user_id } => {
            let admin = identity.factory()?.create_admin_client().into_diagnostic()?;
            let user = admin.user().get(&user_id).await.into_diagnostic()?;
            println!("{}", serde_json::to_string_pretty(&user).into_diagnostic()?);
        }
    }

    Ok(())
}
