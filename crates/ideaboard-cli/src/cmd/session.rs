//! `ib login`, `ib logout`, `ib whoami`.

use crate::context::{BoardContext, USER_ENV};
use crate::output::{OutputMode, fail, render, render_success};
use clap::Args;
use ideaboard_core::session::{self, Identity};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Display name to act as. No password; names are taken on trust.
    pub name: String,
}

#[derive(Debug, Serialize)]
struct WhoAmI<'a> {
    name: &'a str,
    signed_in: bool,
    /// Set when the name comes from the environment override.
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'static str>,
}

pub fn run_login(args: &LoginArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let ctx = BoardContext::open(project_root).map_err(|e| fail(output, e))?;
    let identity = Identity::sign_in(&args.name).map_err(|e| fail(output, e))?;
    session::save_identity(&ctx.kv, &identity).map_err(|e| fail(output, e))?;
    render_success(output, &format!("Signed in as {identity}"))
}

pub fn run_logout(output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let ctx = BoardContext::open(project_root).map_err(|e| fail(output, e))?;
    session::sign_out(&ctx.kv).map_err(|e| fail(output, e))?;
    render_success(output, "Signed out; browsing as Guest")
}

pub fn run_whoami(output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let ctx = BoardContext::open(project_root).map_err(|e| fail(output, e))?;
    let identity = ctx.identity();
    let from_env = std::env::var(USER_ENV).is_ok_and(|v| !v.trim().is_empty());
    let payload = WhoAmI {
        name: identity.name(),
        signed_in: identity.is_signed_in(),
        source: from_env.then_some(USER_ENV),
    };
    render(output, &payload, |p, w| {
        if p.signed_in {
            writeln!(w, "{}", p.name)
        } else {
            writeln!(w, "{} (not signed in)", p.name)
        }
    })
}
