//! Loans Page
//!
//! Loan register and the closure workflow: foreclosure request, document collection,
//! NOC collection, final settlement. Each step is recorded separately.

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracker_domain::{format_date, Loan, LoanAction, LoanDraft, LoanStep, WorkflowStepRequest};

use super::forms::{date_value, input_date};
use crate::api;
use crate::components::{FilePicker, Modal};
use crate::context::use_app_context;
use crate::refresh;
use crate::store::{use_app_store, AppStateStoreFields};
use crate::time;

#[derive(Debug, Clone, PartialEq)]
enum LoanDialog {
    Add,
    Step(Loan, LoanAction),
}

fn step_cell(step: &LoanStep) -> String {
    if !step.done {
        return "-".to_string();
    }
    match (&step.by, step.date) {
        (Some(by), date) => format!("✓ {} ({})", format_date(date), by),
        (None, date) => format!("✓ {}", format_date(date)),
    }
}

#[component]
pub fn LoansPage() -> impl IntoView {
    let store = use_app_store();
    let dialog = RwSignal::new(None::<LoanDialog>);
    let close = Callback::new(move |_: ()| dialog.set(None));

    view! {
        <section class="page loans">
            <div class="page-header">
                <h2>"Loans"</h2>
                <button class="btn primary" on:click=move |_| dialog.set(Some(LoanDialog::Add))>"+ Add loan"</button>
            </div>
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Serial"</th>
                        <th>"Loan"</th>
                        <th>"Bank"</th>
                        <th>"Amount"</th>
                        <th>"EMI"</th>
                        <th>"Period"</th>
                        <th>"Foreclosure"</th>
                        <th>"Documents"</th>
                        <th>"NOC"</th>
                        <th>"Settlement"</th>
                        <th>"Stage"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || store.loans().get()
                        key=|loan| loan.clone()
                        children=move |loan| {
                            let next = loan.next_action();
                            let target = loan.clone();
                            view! {
                                <tr>
                                    <td class="serial">{loan.serial.clone()}</td>
                                    <td>{loan.name.clone()}</td>
                                    <td>{loan.bank.clone()}</td>
                                    <td>{loan.amount.clone()}</td>
                                    <td>{loan.emi.clone()}</td>
                                    <td>{format!("{} – {}", format_date(loan.start_date), format_date(loan.end_date))}</td>
                                    <td>{step_cell(&loan.foreclosure)}</td>
                                    <td>{step_cell(&loan.documents)}</td>
                                    <td>{step_cell(&loan.noc)}</td>
                                    <td>{step_cell(&loan.settlement)}</td>
                                    <td><span class="badge stage">{loan.stage.as_str()}</span></td>
                                    <td class="row-actions">
                                        {next.map(|action| view! {
                                            <button
                                                class="btn small"
                                                on:click=move |_| dialog.set(Some(LoanDialog::Step(target.clone(), action)))
                                            >
                                                {action.label()}
                                            </button>
                                        })}
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            <Show when=move || store.loans().with(Vec::is_empty)>
                <p class="empty">"No loans recorded."</p>
            </Show>
            {move || dialog.get().map(|open| match open {
                LoanDialog::Add => view! { <LoanForm on_close=close /> }.into_any(),
                LoanDialog::Step(loan, action) => view! { <StepDialog loan=loan action=action on_close=close /> }.into_any(),
            })}
        </section>
    }
}

#[component]
fn LoanForm(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let loan_name = RwSignal::new(String::new());
    let bank = RwSignal::new(String::new());
    let amount = RwSignal::new(String::new());
    let emi = RwSignal::new(String::new());
    let start = RwSignal::new(String::new());
    let end = RwSignal::new(String::new());
    let provided = RwSignal::new(String::new());
    let remarks = RwSignal::new(String::new());
    let file = RwSignal::new(None::<String>);
    let (error, set_error) = signal::<Option<String>>(None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = LoanDraft {
            loan_name: loan_name.get().trim().to_string(),
            bank_name: bank.get().trim().to_string(),
            amount: amount.get().trim().to_string(),
            emi: emi.get().trim().to_string(),
            start_date: input_date(&start.get()),
            end_date: input_date(&end.get()),
            provided_document: provided.get().trim().to_string(),
            file: file.get(),
            remarks: remarks.get().trim().to_string(),
        };
        if let Err(e) = draft.validate() {
            set_error.set(Some(e.to_string()));
            return;
        }
        set_error.set(None);
        spawn_local(async move {
            match api::create_loan(&draft).await {
                Ok(()) => {
                    on_close.run(());
                    ctx.success("Loan added");
                    if let Err(e) = refresh::refresh_loans(store).await {
                        ctx.report_api_error("LOANS", e);
                    }
                }
                Err(e) => ctx.report_api_error("LOANS", e),
            }
        });
    };

    let field = move |label: &'static str, signal: RwSignal<String>, kind: &'static str| view! {
        <label>
            {label}
            <input type=kind prop:value=move || signal.get() on:input=move |ev| signal.set(event_target_value(&ev)) />
        </label>
    };

    view! {
        <Modal title="Add loan" on_close=on_close>
            <form class="entity-form" on:submit=on_submit>
                {field("Loan name", loan_name, "text")}
                {field("Bank", bank, "text")}
                {field("Amount", amount, "text")}
                {field("EMI", emi, "text")}
                {field("Start date", start, "date")}
                {field("End date", end, "date")}
                {field("Document provided to bank", provided, "text")}
                <label>
                    "Document scan"
                    <FilePicker on_change={move |url: Option<String>| file.set(url)} />
                </label>
                {field("Remarks", remarks, "text")}
                {move || error.get().map(|e| view! { <p class="form-error">{e}</p> })}
                <div class="form-actions">
                    <button type="submit" class="btn primary">"Save"</button>
                </div>
            </form>
        </Modal>
    }
}

#[component]
fn StepDialog(loan: Loan, action: LoanAction, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let date = RwSignal::new(date_value(Some(time::today())));
    let by = RwSignal::new(ctx.user().map(|u| u.username).unwrap_or_default());
    let remarks = RwSignal::new(String::new());
    let file = RwSignal::new(None::<String>);
    let id = loan.id;
    let serial = loan.serial.clone();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(step_date) = input_date(&date.get()) else {
            ctx.report_error("LOANS", "Pick the date of this step");
            return;
        };
        let request = WorkflowStepRequest {
            date: step_date,
            requested_by: by.get().trim().to_string(),
            remarks: remarks.get().trim().to_string(),
            file: file.get(),
        };
        let serial = serial.clone();
        spawn_local(async move {
            match api::advance_loan(id, action, &request).await {
                Ok(()) => {
                    log::info!("[LOANS] {} on {}", action.label(), serial);
                    on_close.run(());
                    ctx.success(format!("{}: {}", serial, action.label()));
                    if let Err(e) = refresh::refresh_loans(store).await {
                        ctx.report_api_error("LOANS", e);
                    }
                }
                Err(e) => ctx.report_api_error("LOANS", e),
            }
        });
    };

    view! {
        <Modal title=format!("{} · {}", action.label(), loan.serial) on_close=on_close>
            <form class="entity-form" on:submit=on_submit>
                <p>{format!("{} with {} ({})", loan.name, loan.bank, loan.amount)}</p>
                <label>
                    "Date"
                    <input type="date" prop:value=move || date.get() on:input=move |ev| date.set(event_target_value(&ev)) />
                </label>
                <label>
                    "Done by"
                    <input type="text" prop:value=move || by.get() on:input=move |ev| by.set(event_target_value(&ev)) />
                </label>
                <label>
                    "Remarks"
                    <textarea prop:value=move || remarks.get() on:input=move |ev| remarks.set(event_target_value(&ev))></textarea>
                </label>
                <label>
                    "Attachment"
                    <FilePicker on_change={move |url: Option<String>| file.set(url)} />
                </label>
                <div class="form-actions">
                    <button type="submit" class="btn primary">{action.label()}</button>
                </div>
            </form>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_step_cell() {
        assert_eq!(step_cell(&LoanStep::default()), "-");
        let step = LoanStep {
            done: true,
            date: NaiveDate::from_ymd_opt(2026, 9, 1),
            by: Some("Ravi".into()),
        };
        assert_eq!(step_cell(&step), "✓ 01 Sep 2026 (Ravi)");
        let step = LoanStep { by: None, ..step };
        assert_eq!(step_cell(&step), "✓ 01 Sep 2026");
    }
}
