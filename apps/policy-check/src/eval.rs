//! `eval`: one access decision through the policy client.

use std::process::ExitCode;

use access_policy::AccessPolicyModule;
use access_policy_sdk::EvaluationRequest;
use anyhow::Context;
use clap::Args;
use docstore::secure::Operation;
use docstore::{DocPath, Document};
use todoshare_security::Uid;

use crate::config::AppConfig;

/// Exit code for a denied access.
const DENIED: u8 = 2;

#[derive(Args, Debug)]
pub struct EvalArgs {
    /// Caller uid; omit for an anonymous caller.
    #[arg(long)]
    pub caller: Option<Uid>,

    /// get, list, create, update or delete.
    #[arg(long)]
    pub op: Operation,

    /// Document path, e.g. `users/A/todos/1`.
    #[arg(long)]
    pub path: DocPath,

    /// The read arrives through a collection-group query.
    #[arg(long)]
    pub collection_group: bool,

    /// Stored document, as a JSON object.
    #[arg(long, value_name = "JSON")]
    pub existing: Option<String>,

    /// Document after the write, as a JSON object.
    #[arg(long, value_name = "JSON")]
    pub proposed: Option<String>,
}

fn parse_document(flag: &str, raw: Option<&str>) -> anyhow::Result<Option<Document>> {
    raw.map(|json| {
        serde_json::from_str::<Document>(json)
            .with_context(|| format!("--{flag} must be a JSON object"))
    })
    .transpose()
}

impl EvalArgs {
    fn into_request(self) -> anyhow::Result<EvaluationRequest> {
        Ok(EvaluationRequest {
            existing: parse_document("existing", self.existing.as_deref())?,
            proposed: parse_document("proposed", self.proposed.as_deref())?,
            subject: self.caller,
            operation: self.op,
            path: self.path,
            collection_group: self.collection_group,
        })
    }
}

/// Evaluate and print the decision.
///
/// # Errors
///
/// Fails on malformed documents or if the policy cannot be evaluated.
pub async fn run(cfg: &AppConfig, args: EvalArgs) -> anyhow::Result<ExitCode> {
    let request = args.into_request()?;
    let policy = AccessPolicyModule::new().init(cfg.policy.clone())?;
    let response = policy
        .evaluate(request)
        .await
        .context("policy evaluation failed")?;

    if response.decision {
        println!("ALLOW");
        Ok(ExitCode::SUCCESS)
    } else {
        let code = response
            .deny_reason
            .map_or_else(|| "UNSPECIFIED".to_owned(), |r| r.error_code);
        println!("DENY ({code})");
        Ok(ExitCode::from(DENIED))
    }
}
