//! Built-in weighted phrase tables for real-estate sales calls.
//!
//! Phrases are written as they appear in the source tables; [`super::Lexicon`]
//! lowercases them and collapses duplicates when the tables are loaded.

pub const INTERESTED: &[(&str, u32)] = &[
    // Buying intent
    ("i'm interested", 5),
    ("looking to buy", 4),
    ("want to buy", 4),
    ("interested in buying", 5),
    ("send me the details", 3),
    ("can you share the brochure", 3),
    ("brochure", 1),
    ("floor plan", 1),
    ("price per", 3),
    ("what's the price", 4),
    ("how much is it", 4),
    ("price range", 3),
    ("payment plan", 3),
    ("interested in off-plan", 4),
    ("investment opportunity", 4),
    ("ready to move", 5),
    ("title deed", 3),
    ("market value", 3),
    ("mortgage", 3),
    ("commission", 2),
    ("down payment", 3),
    ("handover date", 3),
    ("payment terms", 3),
    ("when can I view", 4),
    ("book a viewing", 4),
    ("site visit", 4),
    ("visit the site", 4),
    ("book a call", 3),
    ("what's the next step", 4),
    ("agent follow-up", 3),
    ("i want to invest", 5),
    ("property investment", 4),
    ("ROI", 4),
    ("expected returns", 4),
    ("how soon can we close", 5),
    ("let's proceed", 5),
    ("send me more info", 3),
    ("shortlist this property", 4),
    ("reserve the unit", 4),
    ("i like this property", 4),
    ("i love this location", 4),
    ("this looks perfect", 4),
    ("ready to proceed", 5),
    ("let's finalize", 5),
    ("i'm serious", 5),
    ("i'm ready", 5),
    ("i've got my budget", 4),
    ("looking for options", 3),
    ("comparing a few options", 3),
    ("can we negotiate", 3),
    ("is it available", 3),
    ("let's move forward", 4),
    // Selling intent
    ("planning to sell", 4),
    ("want to sell", 4),
    ("looking to list", 4),
    ("want to list my property", 4),
    ("how fast can you sell", 3),
    ("how much can I get", 4),
    ("market appraisal", 3),
    ("valuation", 3),
    ("i want to rent it", 4),
    ("i need tenants", 4),
    ("how do you market it", 3),
    ("exclusive listing", 3),
    ("get leads", 3),
    ("list with you", 3),
    ("commission structure", 2),
];

pub const NOT_INTERESTED: &[(&str, u32)] = &[
    ("not interested", 5),
    ("not looking to buy", 5),
    ("not looking to sell", 5),
    ("already purchased", 5),
    ("already sold", 5),
    ("already rented", 5),
    ("just checking prices", 2),
    ("only checking prices", 2),
    ("not interested", 5),
    ("not planning right now", 4),
    ("call me later", 2),
    ("i'm busy", 3),
    ("send me a whatsapp", 2),
    ("no time", 3),
    ("satisfied with my current property", 4),
    ("don't have budget", 4),
    ("not in dubai", 4),
    ("out of the country", 4),
    ("just exploring", 2),
    ("don't want to list", 4),
    ("i'm not selling", 5),
    ("don't want to rent", 4),
    ("not ready", 3),
    ("maybe next year", 3),
    ("no plans to buy", 4),
    ("not in the market", 4),
    ("i'm not investing", 5),
    ("not now", 3),
    ("not at the moment", 3),
    ("leave me alone", 5),
    ("remove me from your list", 5),
    ("don't call again", 5),
    ("already working with another agent", 5),
    ("already listed elsewhere", 5),
    ("i have an agent", 5),
    ("no thanks", 5),
    ("stop calling", 5),
];

pub const MAYBE: &[(&str, u32)] = &[
    ("i'll think about it", 3),
    ("i'll let you know", 3),
    ("maybe in a few months", 3),
    ("call me next week", 2),
    ("call me later", 2),
    ("once i get my funds", 3),
    ("i need time", 3),
    ("i'll discuss it", 3),
    ("not sure yet", 3),
    ("i'll get back to you", 3),
    ("i'm still deciding", 3),
    ("let me talk to my spouse", 3),
    ("let me talk to my partner", 3),
    ("checking options", 3),
    ("considering a few things", 3),
    ("we'll see", 2),
    ("i might", 2),
    ("maybe later", 2),
    ("possibly", 2),
    ("i like it but not now", 3),
    ("need to arrange financing", 3),
    ("waiting for my budget", 3),
    ("waiting for approval", 3),
    ("once I finalize my decision", 3),
    ("when I'm ready", 3),
    ("when I return to Dubai", 3),
    ("maybe after a month", 2),
    ("i'll check my schedule", 2),
    ("thinking about selling", 3),
    ("thinking about buying", 3),
    ("i'll save your number", 2),
];
