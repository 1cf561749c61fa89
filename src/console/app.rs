//! Console Controller
//!
//! Owns the dashboard state and multiplexes, on one task:
//! - command lines from the input
//! - dispatch events (results as they arrive)
//! - the in-flight prediction run
//! - the Show Data delay and the show-more debouncer

use std::io::Write;
use std::time::Duration;

use futures::future::{FutureExt, LocalBoxFuture};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::time::Instant;

use super::command::{Command, HELP};
use super::render;
use crate::logic::classifier::Classifier;
use crate::logic::debounce::Debouncer;
use crate::logic::dispatch::{BatchDispatcher, DispatchError, DispatchEvent, DispatchReport};
use crate::logic::state::DashboardState;

type RunFuture<'a> = LocalBoxFuture<'a, Result<DispatchReport, DispatchError>>;

/// Timing of the Show Data control
#[derive(Debug, Clone, Copy)]
pub struct ShowTiming {
    pub delay: Duration,
    pub debounce: Duration,
}

pub struct Console<C, W> {
    classifier: C,
    dispatcher: BatchDispatcher,
    state: DashboardState,
    timing: ShowTiming,
    out: W,
}

impl<C: Classifier, W: Write> Console<C, W> {
    pub fn new(classifier: C, dispatcher: BatchDispatcher, state: DashboardState, timing: ShowTiming, out: W) -> Self {
        Self {
            classifier,
            dispatcher,
            state,
            timing,
            out,
        }
    }

    /// Predict over the initial window, print everything, return the state.
    pub async fn run_once(mut self) -> anyhow::Result<DashboardState> {
        self.state.set_predicting(true);
        let job = self.state.dispatch_job();
        let outcome = self.dispatcher.run(&self.classifier, &job, &mut self.state).await;
        self.state.set_predicting(false);

        log_outcome(&outcome);
        writeln!(self.out, "{}", render::summary_cards(&self.state.summary()))?;
        writeln!(self.out)?;
        write!(self.out, "{}", render::chart(&self.state.summary()))?;
        writeln!(self.out)?;
        write!(self.out, "{}", render::table(&self.state))?;
        self.out.flush()?;
        Ok(self.state)
    }

    /// Interactive loop. Ends on `quit`, or once the input is exhausted and
    /// nothing is pending.
    pub async fn run_interactive<R>(self, input: R) -> anyhow::Result<DashboardState>
    where
        R: AsyncBufRead + Unpin,
    {
        let Console {
            classifier,
            dispatcher,
            mut state,
            timing,
            mut out,
        } = self;

        let mut lines = input.lines();
        let mut input_closed = false;

        let (tx, mut rx) = mpsc::unbounded_channel::<DispatchEvent>();
        let mut run: Option<RunFuture<'_>> = None;
        // Deadline of the pending Show Data and the increment captured when it was accepted
        let mut show_data_at: Option<(Instant, usize)> = None;
        let mut debouncer: Debouncer<usize> = Debouncer::new(timing.debounce);

        write!(out, "{}", render::table(&state))?;
        writeln!(out, "{}", HELP)?;
        out.flush()?;

        loop {
            if input_closed && run.is_none() && show_data_at.is_none() && !debouncer.is_pending() {
                break;
            }

            tokio::select! {
                line = lines.next_line(), if !input_closed => {
                    let Some(line) = line? else {
                        input_closed = true;
                        continue;
                    };
                    if line.trim().is_empty() {
                        continue;
                    }

                    let command = match line.parse::<Command>() {
                        Ok(command) => command,
                        Err(e) => {
                            writeln!(out, "{}", e)?;
                            continue;
                        }
                    };

                    match command {
                        Command::Quit => break,
                        Command::Help => writeln!(out, "{}", HELP)?,
                        Command::Increment(n) => {
                            state.window_mut().set_increment(n);
                            writeln!(out, "Show-more increment set to {}", n)?;
                        }
                        Command::Show => {
                            // Ignored while a previous Show Data is loading.
                            if show_data_at.is_none() {
                                show_data_at = Some((Instant::now() + timing.delay, state.window().increment()));
                            }
                            writeln!(out, "Loading...")?;
                        }
                        Command::Predict => {
                            if state.is_predicting() {
                                writeln!(out, "Predicting... (a run is already in flight)")?;
                            } else {
                                let job = state.dispatch_job();
                                writeln!(out, "Predicting {} rows...", job.records().len())?;
                                state.set_predicting(true);

                                let mut sink = tx.clone();
                                let classifier = &classifier;
                                run = Some(async move {
                                    dispatcher.run(classifier, &job, &mut sink).await
                                }.boxed_local());
                            }
                        }
                        Command::Top => {
                            writeln!(out, "{}", render::summary_cards(&state.summary()))?;
                            write!(out, "{}", render::chart(&state.summary()))?;
                            write!(out, "{}", render::table(&state))?;
                        }
                        Command::Table => write!(out, "{}", render::table(&state))?,
                        Command::Summary => {
                            writeln!(out, "{}", render::summary_cards(&state.summary()))?;
                            write!(out, "{}", render::chart(&state.summary()))?;
                        }
                    }
                }

                Some(event) = rx.recv() => {
                    let settled = matches!(event, DispatchEvent::BatchSettled { .. });
                    state.apply(event);
                    if settled {
                        writeln!(
                            out,
                            "Resolved {}/{}   {}",
                            state.summary().total(),
                            state.window().visible_range(state.dataset().len()).len(),
                            render::summary_cards(&state.summary())
                        )?;
                    }
                }

                outcome = poll_run(&mut run), if run.is_some() => {
                    run = None;
                    while let Ok(event) = rx.try_recv() {
                        state.apply(event);
                    }
                    state.set_predicting(false);

                    log_outcome(&outcome);
                    writeln!(out, "{}", render::summary_cards(&state.summary()))?;
                    write!(out, "{}", render::chart(&state.summary()))?;
                    write!(out, "{}", render::table(&state))?;
                }

                _ = sleep_until_opt(show_data_at.map(|(at, _)| at)), if show_data_at.is_some() => {
                    if let Some((_, increment)) = show_data_at.take() {
                        debouncer.call(increment);
                    }
                }

                increment = debouncer.fired() => {
                    let before = state.window().visible_range(state.dataset().len()).end;
                    let visible = state.window_mut().show_more(increment);
                    tracing::debug!("View window grown by {} to {}", increment, visible);
                    write!(out, "{}", render::table_rows(&state, before, visible))?;
                }
            }

            out.flush()?;
        }

        drop(run);
        Ok(state)
    }
}

async fn poll_run(run: &mut Option<RunFuture<'_>>) -> Result<DispatchReport, DispatchError> {
    match run {
        Some(fut) => fut.await,
        None => std::future::pending().await,
    }
}

async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn log_outcome(outcome: &Result<DispatchReport, DispatchError>) {
    match outcome {
        Ok(report) => tracing::info!("✅ {}", render::run_line(report)),
        Err(e) => tracing::error!(
            "Batch request error: {} ({} rows resolved before abort)",
            e,
            e.report().succeeded()
        ),
    }
}
