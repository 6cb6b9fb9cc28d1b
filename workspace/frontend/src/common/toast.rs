use yew::prelude::*;

use crate::settings;

#[derive(Clone, PartialEq)]
pub enum ToastType {
    Success,
    Warning,
    Error,
}

impl ToastType {
    fn alert_class(&self) -> &'static str {
        match self {
            ToastType::Success => "alert-success",
            ToastType::Warning => "alert-warning",
            ToastType::Error => "alert-error",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ToastType::Success => "fas fa-check-circle",
            ToastType::Warning => "fas fa-exclamation-triangle",
            ToastType::Error => "fas fa-exclamation-circle",
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct Toast {
    pub id: usize,
    pub message: String,
    pub toast_type: ToastType,
}

#[derive(Clone, PartialEq)]
pub struct ToastContext {
    pub toasts: Vec<Toast>,
    pub add_toast: Callback<(String, ToastType)>,
    pub remove_toast: Callback<usize>,
}

impl ToastContext {
    pub fn show_success(&self, message: String) {
        self.add_toast.emit((message, ToastType::Success));
    }

    pub fn show_warning(&self, message: String) {
        self.add_toast.emit((message, ToastType::Warning));
    }

    pub fn show_error(&self, message: String) {
        self.add_toast.emit((message, ToastType::Error));
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let toasts = use_reducer(ToastList::default);
    let next_id = use_mut_ref(|| 0usize);

    let add_toast = {
        let toasts = toasts.dispatcher();

        Callback::from(move |(message, toast_type): (String, ToastType)| {
            let id = {
                let mut next_id = next_id.borrow_mut();
                *next_id += 1;
                *next_id
            };

            toasts.dispatch(ToastAction::Add(Toast {
                id,
                message,
                toast_type,
            }));

            let toasts = toasts.clone();
            let duration_ms = settings::get_settings().toast_duration_ms;
            let timeout_handle = gloo_timers::callback::Timeout::new(duration_ms, move || {
                toasts.dispatch(ToastAction::Remove(id));
            });
            timeout_handle.forget();
        })
    };

    let remove_toast = {
        let toasts = toasts.dispatcher();
        Callback::from(move |id: usize| toasts.dispatch(ToastAction::Remove(id)))
    };

    let context = ToastContext {
        toasts: toasts.items.clone(),
        add_toast,
        remove_toast: remove_toast.clone(),
    };

    html! {
        <ContextProvider<ToastContext> context={context}>
            {props.children.clone()}
            <div class="toast toast-top toast-end z-50">
                {for toasts.items.iter().map(|toast| {
                    let id = toast.id;
                    let on_close = {
                        let remove_toast = remove_toast.clone();
                        Callback::from(move |_| remove_toast.emit(id))
                    };

                    html! {
                        <div key={id} class={classes!("alert", toast.toast_type.alert_class(), "shadow-lg")}>
                            <i class={toast.toast_type.icon()}></i>
                            <span>{&toast.message}</span>
                            <button class="btn btn-sm btn-ghost btn-circle" onclick={on_close}>
                                <i class="fas fa-times"></i>
                            </button>
                        </div>
                    }
                })}
            </div>
        </ContextProvider<ToastContext>>
    }
}

#[derive(Default, PartialEq)]
struct ToastList {
    items: Vec<Toast>,
}

enum ToastAction {
    Add(Toast),
    Remove(usize),
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: std::rc::Rc<Self>, action: Self::Action) -> std::rc::Rc<Self> {
        let mut items = self.items.clone();
        match action {
            ToastAction::Add(toast) => items.push(toast),
            ToastAction::Remove(id) => items.retain(|t| t.id != id),
        }
        std::rc::Rc::new(ToastList { items })
    }
}
