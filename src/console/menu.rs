//! Login prompt, role menu and dispatch to the services

use std::io::{BufRead, Write};

use super::{is_end_of_input, render, Console};
use crate::{
    error::{AppError, AppResult},
    models::{BookQuery, CreateBook, Credentials, LoanKey, Session, UpdateBook},
    policy::{self, Action},
    services::{auth::AuthService, Services},
};

/// Prompt for credentials until a login succeeds or `max_attempts` have failed
pub async fn login<R: BufRead, W: Write>(
    auth: &AuthService,
    console: &mut Console<R, W>,
    max_attempts: u32,
) -> AppResult<Session> {
    console.say("========================================")?;
    console.say("    Library Management System Login")?;
    console.say("========================================")?;

    let max_attempts = max_attempts.max(1);
    let mut failures = 0;
    loop {
        let username = console.ask("Username: ")?.trim().to_string();
        let password = console.ask("Password: ")?.trim().to_string();

        match auth.login(&Credentials { username, password }).await {
            Ok(session) => {
                console.say(format!("Login successful. Welcome {}!", session.username()))?;
                return Ok(session);
            }
            Err(AppError::Authentication(reason)) => {
                failures += 1;
                console.say(format!("Login failed: {}", reason))?;
                if failures >= max_attempts {
                    return Err(AppError::Authentication(format!(
                        "{} failed login attempts",
                        failures
                    )));
                }
            }
            Err(e) => return Err(e),
        }
    }
}

/// Menu loop for an authenticated session.
///
/// Returns when the user quits or input ends. Operation errors are reported and
/// the menu is shown again; only a broken console ends the loop with an error.
pub async fn run<R: BufRead, W: Write>(
    services: &Services,
    session: &Session,
    console: &mut Console<R, W>,
) -> AppResult<()> {
    let actions = Action::for_role(session.role());

    loop {
        console.say(render::menu(session, &actions))?;
        let choice = match console.ask("Select an option: ") {
            Ok(choice) => choice,
            Err(e) if is_end_of_input(&e) => break,
            Err(e) => return Err(e),
        };

        match choice.trim().parse::<usize>() {
            Ok(0) => {
                console.say("Goodbye.")?;
                break;
            }
            Ok(n) if (1..=actions.len()).contains(&n) => {
                match dispatch(services, session, console, actions[n - 1]).await {
                    Ok(()) => {}
                    Err(e) if is_end_of_input(&e) => break,
                    Err(e) => report(console, e)?,
                }
            }
            _ => console.say("Invalid choice.")?,
        }
    }

    tracing::info!(user = session.username(), "Session ended");
    Ok(())
}

fn report<R: BufRead, W: Write>(console: &mut Console<R, W>, err: AppError) -> AppResult<()> {
    match &err {
        AppError::Io(_) => return Err(err),
        AppError::Statement(_) => tracing::error!(error = %err, "Operation aborted"),
        _ => tracing::debug!(error = %err, "Operation aborted"),
    }
    console.say(&err)
}

async fn dispatch<R: BufRead, W: Write>(
    services: &Services,
    session: &Session,
    console: &mut Console<R, W>,
    action: Action,
) -> AppResult<()> {
    // Refuse before prompting; the services check again before touching the store
    policy::authorize(session, action)?;
    console.say(format!("\n=== {} ===", action))?;

    match action {
        Action::AddBook => {
            let book = CreateBook {
                title: console.ask("Title: ")?,
                publication_date: console.ask("Publication date (YYYY-MM-DD): ")?,
                publisher: console.ask("Publisher: ")?,
                bookshelf_id: console.ask_parsed("Bookshelf ID: ")?,
                room_id: console.ask_parsed("Room ID: ")?,
            };
            let book_id = services.catalog.add_book(session, &book).await?;
            console.say(format!("Book added (ID {}).", book_id))
        }
        Action::DeleteBook => {
            let book_id = console.ask_parsed("ID of the book to delete: ")?;
            let deleted = services.catalog.delete_book(session, book_id).await?;
            console.say("Book deleted.")?;
            if deleted == 0 {
                console.say(format!("Note: no book had ID {}.", book_id))?;
            }
            Ok(())
        }
        Action::UpdateBook => {
            let update = UpdateBook {
                book_id: console.ask_parsed("ID of the book to update: ")?,
                title: console.ask("New title: ")?,
                publisher: console.ask("New publisher: ")?,
            };
            let updated = services.catalog.update_book(session, &update).await?;
            console.say("Book updated.")?;
            if updated == 0 {
                console.say(format!("Note: no book had ID {}.", update.book_id))?;
            }
            Ok(())
        }
        Action::BorrowBook => {
            let key = LoanKey {
                reader_id: console.ask_parsed("Reader ID: ")?,
                book_id: console.ask_parsed("Book ID: ")?,
            };
            services.loans.borrow_book(session, key).await?;
            console.say("Loan recorded.")
        }
        Action::ReturnBook => {
            let key = LoanKey {
                reader_id: console.ask_parsed("Reader ID: ")?,
                book_id: console.ask_parsed("Book ID: ")?,
            };
            let closed = services.loans.return_book(session, key).await?;
            console.say("Return recorded.")?;
            if closed == 0 {
                console.say("Note: no open loan matched this reader and book.")?;
            }
            Ok(())
        }
        Action::SearchBooks => {
            let keyword = console.ask("Title keyword (leave empty to list all): ")?;
            let books = services
                .catalog
                .search_books(session, &BookQuery::keyword(&keyword))
                .await?;
            console.say(render::listing("Books:", &books, render::book_line))
        }
        Action::LoanHistory => {
            let reader_id = console.ask_parsed("Reader ID: ")?;
            let loans = services.loans.loan_history(session, reader_id).await?;
            console.say(render::listing("Loan history:", &loans, render::loan_line))
        }
    }
}
