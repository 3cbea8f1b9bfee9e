// UI layer: interactive login/register/dashboard menus using `dialoguer`.
// Prompts block the (single) runtime thread while waiting for input, which
// is fine here: nothing else runs while the user is typing.

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use crossterm::style::Stylize;
use dialoguer::{Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{Credentials, NewCustomer};
use crate::session::{Session, SessionToken};

/// Top-level controller. Owns the API client and the current session, if
/// any; flows receive what they need from here explicitly.
pub struct App {
    api: ApiClient,
    session: Option<Session>,
}

impl App {
    /// Start logged out.
    pub fn new(api: ApiClient) -> Self {
        Self { api, session: None }
    }

    /// Run the menu loop until the user picks "Exit".
    pub async fn run(&mut self) -> Result<()> {
        println!("{}", "CRM".bold());
        loop {
            let keep_going = match self.session.take() {
                None => self.auth_menu().await?,
                Some(session) => self.dashboard_menu(session).await?,
            };
            if !keep_going {
                break;
            }
        }
        Ok(())
    }

    async fn auth_menu(&mut self) -> Result<bool> {
        let items = ["Login", "Register", "Exit"];
        // `Select` shows a keyboard-navigable list in the terminal.
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => {
                if let Some(token) = handle_login(&self.api).await? {
                    self.start_session(token).await?;
                }
            }
            1 => handle_register(&self.api).await?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    async fn start_session(&mut self, token: SessionToken) -> Result<()> {
        let mut session = Session::new(token);
        reload_customers(&self.api, &mut session).await?;
        print_customers(&session);
        self.session = Some(session);
        Ok(())
    }

    async fn dashboard_menu(&mut self, mut session: Session) -> Result<bool> {
        let items = ["List customers", "Add customer", "Refresh", "Logout", "Exit"];
        let selection = Select::new()
            .with_prompt("Customers")
            .items(&items)
            .default(0)
            .interact()?;
        match selection {
            0 => print_customers(&session),
            1 => handle_add_customer(&self.api, &mut session).await?,
            2 => {
                reload_customers(&self.api, &mut session).await?;
                print_customers(&session);
            }
            3 => {
                println!("Logged out.");
                return Ok(true);
            }
            _ => return Ok(false),
        }
        self.session = Some(session);
        Ok(true)
    }
}

/// Convenience entry point used by `main`.
pub async fn main_menu(api: ApiClient) -> Result<()> {
    App::new(api).run().await
}

/// Collect credentials and register. Success is signalled by a `userId`.
async fn handle_register(api: &ApiClient) -> Result<()> {
    let Some(credentials) = prompt_credentials()? else {
        return Ok(());
    };

    match with_spinner("Registering...", api.register(&credentials)).await {
        Ok(reply) if reply.user_id().is_some() => {
            print_success("Registration successful. You can now log in.");
        }
        Ok(reply) => print_error(&reply.failure_message("Registration failed")),
        Err(e) => report_fault(api, "register", &e),
    }
    Ok(())
}

/// Collect credentials and log in, returning the session token if OK.
async fn handle_login(api: &ApiClient) -> Result<Option<SessionToken>> {
    let Some(credentials) = prompt_credentials()? else {
        return Ok(None);
    };

    match with_spinner("Logging in...", api.login(&credentials)).await {
        Ok(reply) => match reply.token() {
            Some(token) => {
                print_success(&format!("Welcome {}!", credentials.username()));
                Ok(Some(SessionToken::new(token)))
            }
            None => {
                print_error(&reply.failure_message("Login failed"));
                Ok(None)
            }
        },
        Err(e) => {
            report_fault(api, "login", &e);
            Ok(None)
        }
    }
}

async fn handle_add_customer(api: &ApiClient, session: &mut Session) -> Result<()> {
    let record = NewCustomer {
        name: Input::new().with_prompt("Name").interact_text()?,
        email: Input::new().with_prompt("Email").interact_text()?,
        phone: Input::new()
            .with_prompt("Phone")
            .allow_empty(true)
            .interact_text()?,
        address: Input::new()
            .with_prompt("Address")
            .allow_empty(true)
            .interact_text()?,
    };

    match with_spinner("Saving customer...", api.add_customer(&record, &session.token)).await {
        Ok(Some(created)) => {
            session.push_customer(created);
            print_success(&format!("Added {}", record.name));
        }
        Ok(None) => print_error("Customer could not be added: no usable response from server"),
        Err(e) => report_fault(api, "add_customer", &e),
    }
    Ok(())
}

async fn reload_customers(api: &ApiClient, session: &mut Session) -> Result<()> {
    match with_spinner("Loading customers...", api.list_customers(&session.token)).await {
        Ok(customers) => session.replace_customers(customers),
        Err(e) => report_fault(api, "list_customers", &e),
    }
    Ok(())
}

fn prompt_credentials() -> Result<Option<Credentials>> {
    let username: String = Input::new().with_prompt("Username").interact_text()?;
    // `Password` hides input in terminal for passwords.
    let password: String = Password::new().with_prompt("Password").interact()?;
    match Credentials::new(username, password) {
        Ok(credentials) => Ok(Some(credentials)),
        Err(e) => {
            print_error(&e.to_string());
            Ok(None)
        }
    }
}

fn print_customers(session: &Session) {
    let customers = session.customer_views();
    if customers.is_empty() {
        println!("No customers yet.");
        return;
    }
    for customer in customers {
        println!("  {}", customer.summary());
    }
}

/// Show a spinner while `fut` is pending.
async fn with_spinner<F: Future>(message: &'static str, fut: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    let output = fut.await;
    spinner.finish_and_clear();
    output
}

fn report_fault(api: &ApiClient, operation: &'static str, error: &ApiError) {
    tracing::error!(operation, %error, "request failed");
    print_error(&format!(
        "Request failed, check that {} is reachable",
        api.base_url()
    ));
}

fn print_success(message: &str) {
    println!("{}", message.green());
}

fn print_error(message: &str) {
    println!("{}", message.red());
}
