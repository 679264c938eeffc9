//! Static taxonomy registry mapping storefront category slugs onto the
//! destination catalog's curated category tree.
//!
//! The tree is a two-level forest: root categories and their direct
//! children, declared here as compile-time tables and re-derived every run.
//! Subcategory entries are keyed by the slug the source site uses in its
//! category URLs; root entries are keyed by their own canonical key.

use crate::types::LocalizedString;

/// A taxonomy node in the destination catalog's fixed category tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalCategory {
    pub key: String,
    /// `None` for root categories; otherwise a root category's key.
    pub parent_key: Option<String>,
    pub name: LocalizedString,
    pub description: LocalizedString,
    pub slug: String,
    /// Decimal string controlling display order within the parent.
    pub order_hint: String,
    pub external_id: String,
}

struct CategoryDef {
    key: &'static str,
    parent_key: Option<&'static str>,
    name_ru: &'static str,
    name_en: &'static str,
    slug: &'static str,
    order_hint: &'static str,
    description_ru: &'static str,
    description_en: &'static str,
}

impl CategoryDef {
    fn build(&self) -> CanonicalCategory {
        CanonicalCategory {
            key: self.key.to_string(),
            parent_key: self.parent_key.map(|k| k.to_string()),
            name: LocalizedString::of(&[("ru", self.name_ru), ("en", self.name_en)]),
            description: LocalizedString::of(&[
                ("ru", self.description_ru),
                ("en", self.description_en),
            ]),
            slug: self.slug.to_string(),
            order_hint: self.order_hint.to_string(),
            external_id: self.key.to_string(),
        }
    }
}

const ROOT_CATEGORIES: &[CategoryDef] = &[
    CategoryDef {
        key: "board-games",
        parent_key: None,
        name_ru: "Настольные игры",
        name_en: "Board Games",
        slug: "board-games",
        order_hint: "0.01",
        description_ru: "Настольные игры",
        description_en: "Board Games",
    },
    CategoryDef {
        key: "game-accessories",
        parent_key: None,
        name_ru: "Аксессуары для игр",
        name_en: "Game Accessories",
        slug: "game-accessories",
        order_hint: "0.02",
        description_ru: "Аксессуары для игр",
        description_en: "Game Accessories",
    },
    CategoryDef {
        key: "game-expansions",
        parent_key: None,
        name_ru: "Дополнения к играм",
        name_en: "Game Expansions",
        slug: "game-expansions",
        order_hint: "0.03",
        description_ru: "Дополнения к играм",
        description_en: "Game Expansions",
    },
    CategoryDef {
        key: "game-sets-bundles",
        parent_key: None,
        name_ru: "Наборы игр и бандлы",
        name_en: "Game Sets & Bundles",
        slug: "game-sets-bundles",
        order_hint: "0.04",
        description_ru: "Наборы игр и бандлы",
        description_en: "Game Sets & Bundles",
    },
];

/// Subcategories keyed by the source-site slug (the last URL segment of the
/// storefront category page).
const SUBCATEGORIES: &[(&str, CategoryDef)] = &[
    (
        "igry-dlya-vecherinok",
        CategoryDef {
            key: "party-games",
            parent_key: Some("board-games"),
            name_ru: "Вечериночные",
            name_en: "Party Games",
            slug: "party-games",
            order_hint: "0.01",
            description_ru: "Вечериночные игры - это отличный способ провести свободное время с друзьями, развлечься и повысить настроение. В этом разделе вы найдете интересные и увлекательные игры, которые помогут вам организовать незабываемый вечер.",
            description_en: "Party games are a great way to spend free time with friends, have fun and boost your mood. In this section, you will find interesting and engaging games that will help you organize an unforgettable evening.",
        },
    ),
    (
        "for-children",
        CategoryDef {
            key: "kids-games",
            parent_key: Some("board-games"),
            name_ru: "Для детей",
            name_en: "Kids Games",
            slug: "kids-games",
            order_hint: "0.02",
            description_ru: "Игры для детей - это отличный способ развить у них интеллект, развлечься и повысить настроение. В этом разделе вы найдете интересные и увлекательные игры, которые помогут вам организовать незабываемый вечер с ребенком.",
            description_en: "Games for kids are a great way to develop their intelligence, have fun and boost their mood. In this section, you will find interesting and engaging games that will help you organize an unforgettable evening with your child.",
        },
    ),
    (
        "family",
        CategoryDef {
            key: "family-games",
            parent_key: Some("board-games"),
            name_ru: "Для всей семьи",
            name_en: "Family Games",
            slug: "family-games",
            order_hint: "0.03",
            description_ru: "Игры для всей семьи - это отличный способ провести свободное время с членами семьи, развлечься и повысить настроение. В этом разделе вы найдете интересные и увлекательные игры, которые помогут вам организовать незабываемый вечер.",
            description_en: "Games for the whole family are a great way to spend free time with family members, have fun and boost your mood. In this section, you will find interesting and engaging games that will help you organize an unforgettable evening.",
        },
    ),
    (
        "klassicheskie-igri",
        CategoryDef {
            key: "classic-games",
            parent_key: Some("board-games"),
            name_ru: "Классические",
            name_en: "Classic Games",
            slug: "classic-games",
            order_hint: "0.04",
            description_ru: "Классические настольные игры - это игры, которые проверены временем, популярны и любимы многими. Они помогают развивать логическое мышление, память, стратегическое мышление и социальные навыки.",
            description_en: "Classic board games are games that have stood the test of time, are popular and loved by many. They help develop logical thinking, memory, strategic thinking and social skills.",
        },
    ),
    (
        "prikljuchencheskie-igri",
        CategoryDef {
            key: "adventure-games",
            parent_key: Some("board-games"),
            name_ru: "Приключенческие",
            name_en: "Adventure Games",
            slug: "adventure-games",
            order_hint: "0.05",
            description_ru: "Приключенческие игры полны захватывающих сюрпризов и позволяют игрокам отправиться в незабываемые путешествия и испытания.",
            description_en: "Adventure games are filled with thrilling surprises and allow players to embark on unforgettable journeys and challenges.",
        },
    ),
    (
        "strategicheskie",
        CategoryDef {
            key: "strategy-games",
            parent_key: Some("board-games"),
            name_ru: "Стратегические",
            name_en: "Strategy Games",
            slug: "strategy-games",
            order_hint: "0.06",
            description_ru: "Стратегические игры - это игры, которые требуют от игроков планирования, анализа, принятия решений и выполнения задач. Они помогают развивать логическое мышление, память, стратегическое мышление и социальные навыки.",
            description_en: "Strategy games are games that require players to plan, analyze, make decisions and complete tasks. They help develop logical thinking, memory, strategic thinking and social skills.",
        },
    ),
    (
        "kooperativnie",
        CategoryDef {
            key: "cooperative-games",
            parent_key: Some("board-games"),
            name_ru: "Кооперативные",
            name_en: "Cooperative Games",
            slug: "cooperative-games",
            order_hint: "0.07",
            description_ru: "Кооперативные игры - это игры, в которых игроки объединяются в команды, чтобы достичь общей цели или решить задачу. Они помогают развивать навыки командной работы, доверие, коммуникацию и социальные навыки.",
            description_en: "Cooperative games are games in which players form teams to achieve a common goal or solve a problem. They help develop teamwork skills, trust, communication and social skills.",
        },
    ),
    (
        "detective-game",
        CategoryDef {
            key: "detective-games",
            parent_key: Some("board-games"),
            name_ru: "Детективные",
            name_en: "Detective Games",
            slug: "detective-games",
            order_hint: "0.08",
            description_ru: "Детективные игры - это игры, в которых игроки расследуют загадочные происшествия, собирают улики и разгадывают тайны, чтобы раскрыть преступления.",
            description_en: "Detective games are games where players investigate mysterious events, gather clues, and solve mysteries to uncover crimes.",
        },
    ),
    (
        "2players",
        CategoryDef {
            key: "duel-games",
            parent_key: Some("board-games"),
            name_ru: "Дуэльные",
            name_en: "Duel Games",
            slug: "duel-games",
            order_hint: "0.09",
            description_ru: "Дуэльные игры - это игры, предназначенные для двух игроков, где каждый из них должен обойти другого, чтобы достичь победы.",
            description_en: "Duel games are games designed for two players, where each player must outmaneuver the other to achieve victory.",
        },
    ),
    (
        "nastolnye-igry-kvesty",
        CategoryDef {
            key: "quest-games",
            parent_key: Some("board-games"),
            name_ru: "Квесты",
            name_en: "Quest Games",
            slug: "quest-games",
            order_hint: "0.10",
            description_ru: "Квесты - это настольные игры, в которых игроки отправляются в приключения, проходят испытания, собирают улики и разгадывают загадки, чтобы достичь победы.",
            description_en: "Quest games are board games where players go on adventures, pass challenges, gather clues and solve puzzles to achieve victory.",
        },
    ),
    (
        "kartochnye",
        CategoryDef {
            key: "card-games",
            parent_key: Some("board-games"),
            name_ru: "Карточные",
            name_en: "Card Games",
            slug: "card-games",
            order_hint: "0.11",
            description_ru: "Карточные игры - это игры, в которых используются традиционные игральные карты, а также специальные колоды, предназначенные для конкретной игры. Карточные игры - это отличный способ развлечься с друзьями или семьей, улучшить память, логику и стратегическое мышление.",
            description_en: "Card games are games that use traditional playing cards as well as special decks designed for a specific game. Card games are a great way to have fun with friends or family, improve memory, logic, and strategic thinking.",
        },
    ),
    (
        "hardkornie-igri",
        CategoryDef {
            key: "hardcore-games",
            parent_key: Some("board-games"),
            name_ru: "Хардкорные",
            name_en: "Hardcore Games",
            slug: "hardcore-games",
            order_hint: "0.12",
            description_ru: "Хардкорные игры - это игры, требующие от игроков стратегического мышления, расчета рисков, анализа и синтеза. Они предлагают сложные задачи, требующие решения, и не простят ошибок.",
            description_en: "Hardcore games are games that require strategic thinking, risk calculation, analysis and synthesis from players. They offer complex challenges that require solving and do not forgive mistakes.",
        },
    ),
    (
        "prostie",
        CategoryDef {
            key: "simple-games",
            parent_key: Some("board-games"),
            name_ru: "Простые",
            name_en: "Simple Games",
            slug: "simple-games",
            order_hint: "0.13",
            description_ru: "Простые игры - это настольные игры, которые легко понять и быстро освоить, идеально подходят для быстрого развлечения и новичков.",
            description_en: "Simple games are board games that are easy to understand and quick to learn, perfect for quick entertainment and beginners.",
        },
    ),
    (
        "ekonomicheskie",
        CategoryDef {
            key: "economic-games",
            parent_key: Some("board-games"),
            name_ru: "Экономические",
            name_en: "Economic Games",
            slug: "economic-games",
            order_hint: "0.14",
            description_ru: "Экономические игры - это игры, где игроки управляют ресурсами, производством, торговлей, планируют экономику и пытаются достичь своих целей.",
            description_en: "Economic games are games where players manage resources, production, trade, plan economies and try to achieve their goals.",
        },
    ),
    (
        "abstraktnye",
        CategoryDef {
            key: "abstract-games",
            parent_key: Some("board-games"),
            name_ru: "Абстрактные",
            name_en: "Abstract Games",
            slug: "abstract-games",
            order_hint: "0.15",
            description_ru: "Абстрактные игры - это логические игры, которые не имеют конкретной тематики и не включают в себя элементы случайности, они требуют от игроков логики, стратегического мышления и анализа.",
            description_en: "Abstract games are logical games that do not have a specific theme and do not involve elements of chance, they require players to use logic, strategic thinking and analysis.",
        },
    ),
    (
        "interaktivnye-nastolnye-igry",
        CategoryDef {
            key: "interactive-games",
            parent_key: Some("board-games"),
            name_ru: "Интерактивные",
            name_en: "Interactive Games",
            slug: "interactive-games",
            order_hint: "0.16",
            description_ru: "Интерактивные игры - это игры, которые предлагают игрокам активное взаимодействие, например, с помощью мини-игр, задач, головоломок, интерактивных механик, требующих игроков общаться, договариваться, или конкурировать друг с другом.",
            description_en: "Interactive games are games that offer players active interaction, such as through mini-games, challenges, puzzles, interactive mechanics, requiring players to communicate, negotiate, or compete with each other.",
        },
    ),
    (
        "wargame",
        CategoryDef {
            key: "war-games",
            parent_key: Some("board-games"),
            name_ru: "Военные",
            name_en: "War Games",
            slug: "war-games",
            order_hint: "0.17",
            description_ru: "Военные игры - это захватывающие игры, в которых игроки принимают стратегические решения, чтобы победить оппонентов в условиях военных конфликтов.",
            description_en: "War games are thrilling games where players make strategic decisions to defeat opponents in military conflict scenarios.",
        },
    ),
    (
        "romantic-boardgames",
        CategoryDef {
            key: "games-for-couples",
            parent_key: Some("board-games"),
            name_ru: "Для влюбленных",
            name_en: "Games for Couples",
            slug: "games-for-couples",
            order_hint: "0.18",
            description_ru: "Для влюбленных - это игры для двоих, которые помогут вам укрепить отношения, поэкспериментировать с новыми чувствами и пережить вместе новые эмоции.",
            description_en: "Games for Couples are games for two, which will help you strengthen your relationships, experiment with new feelings and experience new emotions together.",
        },
    ),
    (
        "dice-and-dice-towers",
        CategoryDef {
            key: "dice-and-towers",
            parent_key: Some("game-accessories"),
            name_ru: "Кубики и башни для кубиков",
            name_en: "Dice & Dice Towers",
            slug: "dice-and-towers",
            order_hint: "0.01",
            description_ru: "Наборы игровых кубиков, кастомные дайсы и башни для их броска.",
            description_en: "Sets of gaming dice, custom dice, and towers for rolling them.",
        },
    ),
    (
        "card-sleeves",
        CategoryDef {
            key: "card-sleeves",
            parent_key: Some("game-accessories"),
            name_ru: "Протекторы для карт",
            name_en: "Card Sleeves",
            slug: "card-sleeves",
            order_hint: "0.02",
            description_ru: "Защитные кармашки (протекторы) различных размеров для карт настольных игр.",
            description_en: "Protective pockets (sleeves) of various sizes for board game cards.",
        },
    ),
    (
        "playmats",
        CategoryDef {
            key: "playmats",
            parent_key: Some("game-accessories"),
            name_ru: "Игровые коврики",
            name_en: "Playmats",
            slug: "playmats",
            order_hint: "0.03",
            description_ru: "Коврики для комфортной игры, защищающие компоненты и стол.",
            description_en: "Mats for comfortable play, protecting components and the table.",
        },
    ),
    (
        "organizers-and-inserts",
        CategoryDef {
            key: "organizers-inserts",
            parent_key: Some("game-accessories"),
            name_ru: "Органайзеры и вставки",
            name_en: "Organizers & Inserts",
            slug: "organizers-inserts",
            order_hint: "0.04",
            description_ru: "Решения для хранения компонентов игр внутри коробок и на столе.",
            description_en: "Solutions for storing game components inside boxes and on the table.",
        },
    ),
    (
        "tokens-and-markers",
        CategoryDef {
            key: "tokens-markers",
            parent_key: Some("game-accessories"),
            name_ru: "Жетоны и маркеры",
            name_en: "Tokens & Markers",
            slug: "tokens-markers",
            order_hint: "0.05",
            description_ru: "Дополнительные или заменяющие жетоны, фишки и маркеры для игр.",
            description_en: "Additional or replacement tokens, chips, and markers for games.",
        },
    ),
];

/// Resolve a source-site category key to its canonical category.
///
/// Lookup is case-insensitive: first the subcategory map (keyed by
/// source-site slug), then the root list (keyed by canonical key). Unknown
/// keys return `None`; callers log and continue: an unmapped category must
/// never abort a batch.
///
/// # Examples
///
/// ```
/// use meeple_catalog::taxonomy::resolve;
///
/// let cat = resolve("strategicheskie").unwrap();
/// assert_eq!(cat.key, "strategy-games");
///
/// let root = resolve("Board-Games").unwrap();
/// assert!(root.parent_key.is_none());
///
/// assert!(resolve("no-such-category").is_none());
/// ```
pub fn resolve(source_key: &str) -> Option<CanonicalCategory> {
    let needle = source_key.to_lowercase();

    if let Some((_, def)) = SUBCATEGORIES.iter().find(|(slug, _)| *slug == needle) {
        return Some(def.build());
    }

    ROOT_CATEGORIES
        .iter()
        .find(|def| def.key.eq_ignore_ascii_case(&needle))
        .map(CategoryDef::build)
}

/// All categories for bulk export: roots in declaration order, then each
/// root's children in declaration order.
pub fn all_categories() -> Vec<CanonicalCategory> {
    let mut out: Vec<CanonicalCategory> = ROOT_CATEGORIES.iter().map(CategoryDef::build).collect();
    for root in ROOT_CATEGORIES {
        for (_, def) in SUBCATEGORIES {
            if def.parent_key == Some(root.key) {
                out.push(def.build());
            }
        }
    }
    out
}
