use crate::config::Config;
use crate::report;
use anyhow::{Context, Result};
use bytes::Bytes;
use mod_delivery::{SingleWrite, SplitWrite};
use mod_hello::HelloProfile;
use splithello_traits::{DeliveryStrategy, Prober, TrialOutcome, TrialReport};
use std::io::Write;
use tracing::info;

/// Runs the fixed trial matrix: each ClientHello profile, once in a single
/// write and once split in two. Trials run one after another, each on its own
/// connection, and a failing trial never stops the ones after it.
pub struct ProbeSuite<P: Prober> {
    config: Config,
    prober: P,
}

impl<P: Prober> ProbeSuite<P> {
    pub fn new(config: Config, prober: P) -> Self {
        Self { config, prober }
    }

    /// Builds every message up front so a bad server name fails before any traffic.
    pub fn build_messages(&self) -> Result<Vec<(HelloProfile, Bytes)>> {
        let name = &self.config.target.server_name;
        HelloProfile::ALL
            .iter()
            .map(|profile| {
                let message = profile
                    .build(name)
                    .with_context(|| {
                        format!("building {} ClientHello for {:?}", profile.label(), name)
                    })?;
                Ok((*profile, message))
            })
            .collect()
    }

    fn strategies(&self) -> Vec<Box<dyn DeliveryStrategy>> {
        vec![
            Box::new(SingleWrite),
            Box::new(SplitWrite {
                delay: self.config.split_delay,
            }),
        ]
    }

    pub async fn run<W: Write + ?Sized>(&self, out: &mut W) -> Result<Vec<TrialReport>> {
        let messages = self.build_messages()?;
        let strategies = self.strategies();
        let target = &self.config.target;

        let mut reports = Vec::with_capacity(messages.len() * strategies.len());
        for (index, (profile, message)) in messages.iter().enumerate() {
            if index == 0 {
                report::intro(out, message.len(), target)?;
            } else {
                report::control_intro(out, message.len())?;
            }

            for strategy in &strategies {
                report::trial_heading(out, strategy.name())?;
                out.flush()?;

                let outcome = TrialOutcome::from(
                    self.prober
                        .probe(target, message, strategy.as_ref())
                        .await,
                );
                match &outcome {
                    TrialOutcome::Failed(e) => info!(
                        "{} ClientHello via {} failed: {}",
                        profile.label(),
                        strategy.name(),
                        e
                    ),
                    TrialOutcome::Received(data) => info!(
                        "{} ClientHello via {}: {} ({} bytes)",
                        profile.label(),
                        strategy.name(),
                        outcome.verdict(),
                        data.len()
                    ),
                }

                report::trial_result(out, &outcome)?;
                reports.push(TrialReport {
                    profile: profile.label().to_string(),
                    strategy: strategy.name().to_string(),
                    message_len: message.len(),
                    outcome,
                });
            }
        }

        report::summary(out, &reports)?;
        out.flush()?;
        Ok(reports)
    }
}
