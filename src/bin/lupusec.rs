// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command line utility for Lupusec alarm panels.
//!
//! ```text
//! lupusec -u admin -p secret -i 192.168.1.50 --status
//! lupusec -u admin -p secret -i 192.168.1.50 --area 2 --home 1
//! lupusec -u admin -p secret -i 192.168.1.50 --switch-on 9
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

use lupusec_lib::{Lupusec, PanelModel};

/// Control a Lupusec alarm panel from the command line.
#[derive(Parser, Debug)]
#[command(name = "lupusec", version, about)]
struct Cli {
    /// Username of the web interface
    #[arg(short, long, env = "LUPUSEC_USERNAME")]
    username: String,

    /// Password of the web interface
    #[arg(short, long, env = "LUPUSEC_PASSWORD")]
    password: String,

    /// IP address or host name of the panel
    #[arg(short, long = "ip-address", visible_alias = "ip_address", env = "LUPUSEC_IP")]
    ip_address: String,

    /// Area to control
    #[arg(long, default_value_t = 1)]
    area: u8,

    /// Panel firmware family (xt1 or xt2)
    #[arg(long, default_value_t = PanelModel::Xt1)]
    model: PanelModel,

    /// History log file (defaults to ~/.lupusec_history_cache.json)
    #[arg(long)]
    history_file: Option<PathBuf>,

    /// Output the status of all areas
    #[arg(long)]
    status: bool,

    /// Output all binary sensors
    #[arg(long)]
    sensors: bool,

    /// Output all power switches
    #[arg(long)]
    switches: bool,

    /// Arm the area
    #[arg(long)]
    arm: bool,

    /// Disarm the area
    #[arg(long)]
    disarm: bool,

    /// Set the area to home mode 1, 2 or 3
    #[arg(long, value_name = "LEVEL")]
    home: Option<u8>,

    /// Turn a power switch on
    #[arg(long, value_name = "ID")]
    switch_on: Option<String>,

    /// Turn a power switch off
    #[arg(long, value_name = "ID")]
    switch_off: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Output only warnings and errors
    #[arg(long, conflicts_with = "debug")]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> Level {
        if self.debug {
            Level::DEBUG
        } else if self.quiet {
            Level::WARN
        } else {
            Level::INFO
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_target(false)
        .init();

    if let Err(e) = run(cli).await {
        tracing::error!("{e}");
    }
}

async fn run(cli: Cli) -> lupusec_lib::Result<()> {
    let mut builder = Lupusec::http(&cli.ip_address)
        .with_credentials(&cli.username, &cli.password)
        .with_model(cli.model);
    if let Some(path) = &cli.history_file {
        builder = builder.with_history_path(path);
    }
    let mut panel = builder.build().await?;

    if cli.status {
        for area in panel.areas().await? {
            tracing::info!("{area}");
        }
        return Ok(());
    }

    if cli.sensors {
        for sensor in panel.binary_sensors().await? {
            tracing::info!("{sensor}");
        }
        return Ok(());
    }

    if cli.switches {
        for switch in panel.switches().await? {
            tracing::info!("{switch}");
        }
        return Ok(());
    }

    if let Some(id) = &cli.switch_on {
        report(panel.switch_on(id.as_str()).await?, "Switch turned on");
    }
    if let Some(id) = &cli.switch_off {
        report(panel.switch_off(id.as_str()).await?, "Switch turned off");
    }

    if cli.arm {
        report(panel.set_armed(cli.area).await?, "Alarm mode changed to armed");
    } else if cli.disarm {
        report(
            panel.set_disarmed(cli.area).await?,
            "Alarm mode changed to disarmed",
        );
    } else if let Some(level) = cli.home {
        report(
            panel.set_home(cli.area, level).await?,
            "Alarm mode changed to home",
        );
    }

    Ok(())
}

fn report(accepted: bool, message: &str) {
    if accepted {
        tracing::info!("{message}");
    } else {
        tracing::warn!("Panel rejected the request: {message}");
    }
}
