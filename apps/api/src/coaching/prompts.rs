// Prompt templates for the six coaching features.
// Placeholders are `{field}` where `field` is a Profile field name; the
// template registry rejects anything else at startup.

/// Weekly workout plan. Placeholders: {name}, {age}, {position}, {surface}, {level}, {goal}
pub const WORKOUT_PROMPT_TEMPLATE: &str = r#"
You are a professional tennis coach.

Player: {name}
Age: {age}
Style: {position}
Surface: {surface}
Level: {level}
Goal: {goal}

Create a full weekly workout plan with warmup, drills, strength, and recovery.
"#;

/// Injury recovery program. Placeholders: {name}, {injuries}, {goal}
pub const INJURY_RECOVERY_PROMPT_TEMPLATE: &str = r#"
You are a sports physiotherapist.

Player: {name}
Injuries: {injuries}
Goal: {goal}

Create a safe injury recovery program.
"#;

/// Match tactics. Placeholders: {name}, {position}, {surface}, {level}
pub const TACTICS_PROMPT_TEMPLATE: &str = r#"
You are a professional match strategist.

Player: {name}
Style: {position}
Surface: {surface}
Level: {level}

Create tactical match strategy.
"#;

/// Daily nutrition plan. Placeholders: {name}, {age}, {diet}, {goal}
pub const NUTRITION_PROMPT_TEMPLATE: &str = r#"
You are a sports nutritionist.

Player: {name}
Age: {age}
Diet: {diet}
Goal: {goal}

Create daily nutrition plan.
"#;

/// Mental toughness routine. Placeholders: {name}, {age}, {level}, {goal}
pub const MENTAL_TRAINING_PROMPT_TEMPLATE: &str = r#"
You are a sports psychologist.

Player: {name}
Age: {age}
Level: {level}
Goal: {goal}

Create mental toughness routine.
"#;

/// Serve improvement program. Placeholders: {name}, {serve_pct}, {injuries}
pub const SERVE_TRAINING_PROMPT_TEMPLATE: &str = r#"
You are a serve biomechanics expert.

Player: {name}
Serve %: {serve_pct}
Injuries: {injuries}

Create serve improvement program.
"#;
