use crate::conf::RuntimeConfig;
use crate::proxy::MirrorGateway;
use crate::server::pid;
use crate::server::runtime::{RuntimeState, build_runtime_state};
use anyhow::{Context, Result};
use pingora::prelude::*;
use pingora::server::Server;
use pingora::server::configuration::ServerConf;
use std::sync::Arc;

/// Build the runtime state and serve until the process is stopped.
pub fn run(config: RuntimeConfig) -> Result<()> {
    if let Some(pid_file) = &config.server.pid_file {
        match pid::write_pid(pid_file) {
            Ok(()) => tracing::info!(pid_file = %pid_file.display(), "pid file written"),
            Err(e) => {
                tracing::warn!(error = %e, pid_file = %pid_file.display(), "failed to write pid file; continuing")
            }
        }
    }

    let state = Arc::new(build_runtime_state(&config)?);
    let server = build_pingora_server(&config, state)?;

    if let Some(pid_file) = config.server.pid_file.clone() {
        ctrlc::set_handler(move || {
            tracing::info!("shutdown requested, removing pid file");
            pid::remove_pid(&pid_file);
            std::process::exit(0);
        })?;
    }

    tracing::info!(
        addr = %config.listener.addr,
        strategy = config.encoding.strategy_name(),
        default_upstream = %config.upstream.default_host,
        "hfmirror listening"
    );

    server.run_forever();
}

pub fn build_pingora_server(config: &RuntimeConfig, state: Arc<RuntimeState>) -> Result<Server> {
    let mut conf = ServerConf::new().context("could not construct pingora server configuration")?;
    if let Some(threads) = config.server.threads {
        tracing::debug!(threads, "overriding pingora worker threads");
        conf.threads = threads;
    }
    if let Some(ca_file) = &config.server.ca_file {
        conf.ca_file = Some(ca_file.display().to_string());
    }

    let mut server = Server::new_with_opt_and_conf(None, conf);
    server.bootstrap();

    let gateway = MirrorGateway::new(state);
    let mut svc = http_proxy_service(&server.configuration, gateway);
    svc.add_tcp(&config.listener.addr);

    server.add_service(svc);

    Ok(server)
}
