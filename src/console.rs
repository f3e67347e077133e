use std::{
    io::{self, BufRead},
    sync::mpsc::Sender,
    thread,
};
use cgmath::Point2;

use crate::api::models::{Credentials, IdentityDocuments, PasswordReset};
use crate::controller::{Controller, UiEvent};
use crate::dispatcher::Message;
use crate::map_sys::LatLng;
use crate::page::{ReportField, Route};


const HELP: &'static str = "\
commands:
  register EMAIL PASSWORD     login EMAIL PASSWORD     logout
  reset EMAIL NEW_PASSWORD    open login|home|reset
  menu                        outside                  faq N
  verify AADHAAR_FILE PROOF_FILE
  set title|description|category|location TEXT...    report
  pin LAT LNG                 tap X Y                  tiles
  issues                      upvote ID                help
  quit";


#[derive(Debug, PartialEq)]
pub enum Command {
    Event(UiEvent),
    Help,
    Quit,
}


pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let name = match words.next() {
        Some(name) => name,
        None => return Ok(None),
    };
    let args = words.collect::<Vec<_>>();

    let event = match (name, args.as_slice()) {
        ("help", []) => return Ok(Some(Command::Help)),
        ("quit", []) | ("exit", []) => return Ok(Some(Command::Quit)),
        ("register", [email, password]) => UiEvent::Register(Credentials::new(email, password)),
        ("login", [email, password]) => UiEvent::Login(Credentials::new(email, password)),
        ("logout", []) => UiEvent::Logout,
        ("reset", [email, password]) => UiEvent::ResetPassword(PasswordReset::new(email, password)),
        ("open", [route]) => UiEvent::Navigate(parse_route(route)?),
        ("menu", []) => UiEvent::DropdownClick,
        ("outside", []) => UiEvent::DocumentClick { inside_dropdown: false },
        ("faq", [n]) => {
            let n = parse_number::<usize>(n)?;
            if n == 0 {
                return Err("FAQ items start at 1".into());
            }
            UiEvent::FaqToggle(n - 1)
        },
        ("verify", [aadhar, other_id]) => UiEvent::VerifySubmit(IdentityDocuments {
            aadhar: aadhar.into(),
            other_id: other_id.into(),
        }),
        ("set", [field, text @ ..]) => UiEvent::ReportInput(parse_field(field)?, text.join(" ")),
        ("report", []) => UiEvent::ReportSubmit,
        ("pin", [lat, lng]) => {
            let at = LatLng::new(parse_number(lat)?, parse_number(lng)?);
            if !at.is_valid() {
                return Err(format!("{} is not on the map", at));
            }
            UiEvent::MapClick(at)
        },
        ("tap", [x, y]) => UiEvent::MapTap(Point2::new(parse_number(x)?, parse_number(y)?)),
        ("tiles", []) => UiEvent::ShowTile,
        ("issues", []) => UiEvent::ReloadIssues,
        ("upvote", [id]) => UiEvent::Upvote(parse_number(id)?),
        _ => return Err(format!("Unknown command '{}', try 'help'", line.trim())),
    };

    Ok(Some(Command::Event(event)))
}

fn parse_number<T: std::str::FromStr>(text: &str) -> Result<T, String> {
    text.parse::<T>().map_err(|_| format!("'{}' is not a number", text))
}

fn parse_route(text: &str) -> Result<Route, String> {
    match text {
        "login" => Ok(Route::Login),
        "home" => Ok(Route::Home),
        "reset" => Ok(Route::ResetPassword),
        _ => Err(format!("Unknown page '{}'", text)),
    }
}

fn parse_field(text: &str) -> Result<ReportField, String> {
    match text {
        "title" => Ok(ReportField::Title),
        "description" => Ok(ReportField::Description),
        "category" => Ok(ReportField::Category),
        "location" => Ok(ReportField::Location),
        _ => Err(format!("Unknown report field '{}'", text)),
    }
}


pub fn print_help() {
    println!("{}", HELP);
}

// Feeds stdin lines into the UI loop; end of input quits.
pub fn spawn_input(sender: Sender<Message>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let stdin = io::stdin();

        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    warn!("Fail to read input: {}", err);
                    break;
                },
            };

            let message = match parse_command(&line) {
                Ok(Some(Command::Event(event))) => Message::Ui(event),
                Ok(Some(Command::Help)) => {
                    print_help();
                    continue;
                },
                Ok(Some(Command::Quit)) => break,
                Ok(None) => continue,
                Err(err) => {
                    println!("{}", err);
                    continue;
                },
            };

            if sender.send(message).is_err() {
                return;
            }
        }

        let _ = sender.send(Message::Quit);
    })
}


// Prints alerts as they come and the page whenever it changes.
pub struct Screen {
    last: String,
}

impl Screen {
    pub fn new() -> Self {
        Screen { last: String::new() }
    }

    pub fn update(&mut self, controller: &mut Controller) {
        for alert in controller.take_alerts() {
            println!("(alert) {}", alert);
        }

        let text = controller.page().render();
        if text != self.last {
            print!("{}", text);
            self.last = text;
        }
    }
}
