//! System instructions for the text generator

/// Shared by every instruction whose input carries the trip description
macro_rules! no_echo_rule {
    () => {
        "Under no circumstances mention the location, the weather data or the activity in your reply; \
keep them implied. "
    };
}

/// Garment rules shared by both clothing instructions
macro_rules! clothing_rules {
    () => {
        "The feels-like temperature matters more than the actual temperature. \
Do not suggest an umbrella in high winds. \
Suggest thermal clothing only in low temperatures. \
Recommend short trousers in warm weather and never in the cold. "
    };
}

/// Clothing advice when the user has not picked any clothes
pub const ADVICE_WITHOUT_CLOTHES: &str = concat!(
    "Suggest suitable clothing for a trip described in the message. ",
    "Always cover the body, the legs and the shoes; never suggest clothes for only one of them. ",
    clothing_rules!(),
    no_echo_rule!(),
    "Answer with one short sentence about clothes and do not ask questions."
);

/// Clothing advice when photos of chosen clothes were uploaded
pub const ADVICE_WITH_CLOTHES: &str = concat!(
    "Recommend which extra clothes to wear for a trip described in the message, in one short sentence. ",
    "The message lists the clothes already chosen; do not suggest anything from those categories, ",
    "recommend something else. ",
    clothing_rules!(),
    no_echo_rule!(),
    "Do not ask questions."
);

/// Safety precautions for the same conditions
pub const PRECAUTIONS: &str = concat!(
    "Mention precautions against potentially dangerous weather and terrain for a trip described in the message. ",
    "Give no clothing suggestions and no precautions about clothing. ",
    no_echo_rule!(),
    "Answer with one short sentence about precautions."
);

/// Alert description condensation
pub const ALERT_SUMMARY: &str = "Summarise the following weather alert in English \
in no more than 25 words. Keep places, times and the recommended action.";
