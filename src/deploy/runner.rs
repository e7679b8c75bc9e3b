//! Linear deployment script.

use std::io::Write;

use crate::config::ContractSpec;
use crate::deploy::factory::{ContractFactory, DeployedContract};
use crate::deploy::DeployResult;

/// Outcome of a deployment run.
#[derive(Debug, Default)]
pub struct DeployReport {
    /// Contracts deployed before the run finished or failed.
    pub deployed: Vec<DeployedContract>,
    /// The failure that stopped the run.
    pub error: Option<String>,
}

impl DeployReport {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Process exit status: 0 on success, 1 on any failure.
    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

/// Deploy every contract of `plan` in order.
///
/// Progress and addresses go to `out`. The first failure is written once to
/// `err` and ends the run; contracts after it are not attempted.
pub async fn run_deployment<F, O, E>(
    factory: &F,
    plan: &[ContractSpec],
    out: &mut O,
    err: &mut E,
) -> DeployReport
where
    F: ContractFactory,
    O: Write,
    E: Write,
{
    let mut report = DeployReport::default();

    match deploy_all(factory, plan, out, &mut report.deployed).await {
        Ok(()) => {
            tracing::info!(count = report.deployed.len(), "Deployment finished");
        }
        Err(e) => {
            tracing::debug!(deployed = report.deployed.len(), "Deployment aborted");
            if let Err(write_err) = writeln!(err, "{e}") {
                tracing::error!(error = %e, write_error = %write_err, "Deployment failed and the error stream is unwritable");
            }
            report.error = Some(e.to_string());
        }
    }

    report
}

async fn deploy_all<F, O>(
    factory: &F,
    plan: &[ContractSpec],
    out: &mut O,
    deployed: &mut Vec<DeployedContract>,
) -> DeployResult<()>
where
    F: ContractFactory,
    O: Write,
{
    for contract in plan {
        writeln!(out, "Deploying {}...", contract.name)?;

        let pending = factory.deploy(contract).await?;
        let instance = factory.deployed(pending).await?;

        writeln!(out, "{} deployed to: {}", instance.name, instance.address)?;
        deployed.push(instance);
    }
    Ok(())
}
