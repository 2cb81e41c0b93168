// Static text for the informational panels.

pub const APP_TITLE: &str = "CoachBot AI";
pub const APP_TAGLINE: &str = "AI-Powered Tennis Coaching System";

pub const ABOUT_TITLE: &str = "About CoachBot AI";
pub const ABOUT_TEXT: &str = "CoachBot AI is an AI-powered tennis coaching assistant that provides \
personalized training, nutrition, tactical, and recovery guidance.\n\n\
It adapts recommendations based on player profile, injuries, and goals.";

pub const DISCLAIMER_TITLE: &str = "Disclaimer";
pub const DISCLAIMER_TEXT: &str = "This application provides general training guidance.\n\n\
It does NOT replace professional medical or coaching advice.\n\n\
Always consult certified professionals for injuries and health issues.";
