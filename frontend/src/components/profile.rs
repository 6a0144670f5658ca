//! 个人资料与修改密码

use leptos::prelude::*;
use leptos::task::spawn_local;
use panelworks_shared::forms::{PasswordChangeInput, ProfileInput, check};
use panelworks_shared::protocol::ProfileRequest;
use panelworks_shared::{FieldMessages, UserProfile};
use tracing::warn;

use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::field::{FieldError, absorb_field_errors};
use crate::components::loader::PageLoader;
use crate::components::toast::use_toasts;
use crate::web::LocalStorage;

/// 带标签和错误提示的文本输入
#[component]
fn TextField<T: Send + Sync + 'static>(
    form: RwSignal<T>,
    errors: RwSignal<FieldMessages>,
    field: &'static str,
    label: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    get: fn(&T) -> String,
    set: fn(&mut T, String),
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label" for=field>
                <span class="label-text">{label}</span>
            </label>
            <input
                id=field
                type=input_type
                class="input input-bordered"
                class:input-error=move || errors.with(|e| e.contains_key(field))
                prop:value=move || form.with(get)
                on:input=move |ev| {
                    form.update(|f| set(f, event_target_value(&ev)));
                    errors.update(|e| {
                        e.remove(field);
                    });
                }
            />
            <FieldError errors=errors field=field />
        </div>
    }
}

#[component]
pub fn EditProfilePage() -> impl IntoView {
    let api = use_api();
    let auth = use_auth();
    let toasts = use_toasts();

    let form = RwSignal::new(ProfileInput::default());
    let errors = RwSignal::new(FieldMessages::new());
    let loading = RwSignal::new(true);
    let saving = RwSignal::new(false);

    Effect::new(move |_| {
        spawn_local(async move {
            let client = api.get_value();
            match client.call(&ProfileRequest).await {
                Ok(resp) => form.set(resp.data),
                Err(e) => {
                    warn!(error = %e, "profile unavailable");
                    if !e.is_session_expired() {
                        toasts.error("Failed to load profile");
                    }
                }
            }
            loading.set(false);
        });
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let input = form.get_untracked();
        if let Err(messages) = check(&input) {
            errors.set(messages);
            return;
        }
        errors.set(FieldMessages::new());
        saving.set(true);

        spawn_local(async move {
            let client = api.get_value();
            match client.call(&input).await {
                Ok(resp) => {
                    // 导航栏里的名字随之更新
                    auth.set_state.update(|session| {
                        let user = UserProfile {
                            name: input.name.clone(),
                            email: input.email.clone(),
                            ..session.user.clone().unwrap_or_default()
                        };
                        session.replace_user(&LocalStorage, user);
                    });
                    toasts.success(if resp.message.is_empty() {
                        "Profile updated".to_string()
                    } else {
                        resp.message
                    });
                }
                Err(e) => {
                    if !absorb_field_errors(errors, &e) && !e.is_session_expired() {
                        toasts.error(e.server_message().unwrap_or("Failed to update profile").to_string());
                    }
                }
            }
            saving.set(false);
        });
    };

    view! {
        <Show when=move || !loading.get() fallback=|| view! { <PageLoader /> }>
            <div class="card bg-base-100 shadow-xl max-w-2xl mx-auto">
                <form class="card-body" on:submit=on_submit>
                    <h3 class="card-title">"Edit Profile"</h3>
                    <TextField
                        form=form
                        errors=errors
                        field="name"
                        label="Name"
                        get=|f: &ProfileInput| f.name.clone()
                        set=|f: &mut ProfileInput, v| f.name = v
                    />
                    <TextField
                        form=form
                        errors=errors
                        field="email"
                        label="Email"
                        input_type="email"
                        get=|f: &ProfileInput| f.email.clone()
                        set=|f: &mut ProfileInput, v| f.email = v
                    />
                    <div class="card-actions justify-end mt-4">
                        <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                            {move || if saving.get() { "Saving..." } else { "Update Profile" }}
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}

#[component]
pub fn ChangePasswordPage() -> impl IntoView {
    let api = use_api();
    let toasts = use_toasts();

    let form = RwSignal::new(PasswordChangeInput::default());
    let errors = RwSignal::new(FieldMessages::new());
    let saving = RwSignal::new(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let input = form.get_untracked();
        if let Err(messages) = check(&input) {
            errors.set(messages);
            return;
        }
        errors.set(FieldMessages::new());
        saving.set(true);

        spawn_local(async move {
            let client = api.get_value();
            match client.call(&input).await {
                Ok(resp) => {
                    form.set(PasswordChangeInput::default());
                    toasts.success(if resp.message.is_empty() {
                        "Password changed".to_string()
                    } else {
                        resp.message
                    });
                }
                Err(e) => {
                    if !absorb_field_errors(errors, &e) && !e.is_session_expired() {
                        toasts.error(e.server_message().unwrap_or("Failed to change password").to_string());
                    }
                }
            }
            saving.set(false);
        });
    };

    view! {
        <div class="card bg-base-100 shadow-xl max-w-2xl mx-auto">
            <form class="card-body" on:submit=on_submit>
                <h3 class="card-title">"Change Password"</h3>
                <TextField
                    form=form
                    errors=errors
                    field="current_password"
                    label="Current Password"
                    input_type="password"
                    get=|f: &PasswordChangeInput| f.current_password.clone()
                    set=|f: &mut PasswordChangeInput, v| f.current_password = v
                />
                <TextField
                    form=form
                    errors=errors
                    field="new_password"
                    label="New Password"
                    input_type="password"
                    get=|f: &PasswordChangeInput| f.new_password.clone()
                    set=|f: &mut PasswordChangeInput, v| f.new_password = v
                />
                <TextField
                    form=form
                    errors=errors
                    field="confirm_password"
                    label="Confirm Password"
                    input_type="password"
                    get=|f: &PasswordChangeInput| f.confirm_password.clone()
                    set=|f: &mut PasswordChangeInput, v| f.confirm_password = v
                />
                <div class="card-actions justify-end mt-4">
                    <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                        {move || if saving.get() { "Saving..." } else { "Change Password" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
