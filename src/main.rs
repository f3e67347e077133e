#[macro_use] extern crate log;


mod api;
mod auth_sys;
mod config;
mod console;
mod controller;
mod dispatcher;
mod error;
mod geocoder;
mod issue_sys;
mod logger;
mod map_sys;
mod nav_sys;
mod page;
mod report_sys;
mod state;
mod task;
mod util;
mod verify_sys;

#[cfg(test)]
mod testing;


use std::{
    process,
    sync::{Arc, mpsc},
};

use api::HttpBackend;
use config::Config;
use console::Screen;
use controller::Controller;
use dispatcher::Dispatcher;
use geocoder::NominatimGeocoder;


fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(2);
        },
    };

    let _sentry = logger::init_logger(&config)
        .expect("Logger initialization failed.");

    let backend = match HttpBackend::new(&config) {
        Ok(backend) => Arc::new(backend),
        Err(err) => {
            error!("Fail to create backend client: {}", err);
            process::exit(1);
        },
    };
    let geocoder = match NominatimGeocoder::new(&config) {
        Ok(geocoder) => Arc::new(geocoder),
        Err(err) => {
            error!("Fail to create geocoder client: {}", err);
            process::exit(1);
        },
    };

    info!("FixHub client for {}", config.base_url);

    let (sender, receiver) = mpsc::channel();
    let dispatcher = Dispatcher::new(config.workers, backend, geocoder, sender.clone());
    let mut controller = Controller::new(&config);
    let mut screen = Screen::new();

    console::print_help();
    let input = console::spawn_input(sender);

    dispatcher::run_event_loop(&mut controller, &dispatcher, &receiver, Vec::new(),
        |c| screen.update(c));

    if input.join().is_err() {
        warn!("Input thread panicked");
    }
}
