// Security module for the session gate
//
// Management views are rendered only for visitors with a session from the
// external identity provider; everyone else is sent to the login view with a
// callback back to where they were going.

pub mod session;

pub use session::{
    GateDecision, NoSessions, Session, SessionProvider, TrustedHeaderSessions, gate,
    login_redirect,
};
