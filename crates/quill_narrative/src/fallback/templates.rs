//! Portuguese text pools for the fallback generator.
//!
//! Placeholders: `{a}` and `{b}` are the first two characters, `{local}`
//! the setting, `{clima}` the weather, `{periodo}` the time of day. The
//! `_cap` variants are capitalized.

use super::elements::{Mood, Setting, Weather};

/// Six beat descriptions and their tones for a mood.
pub(crate) fn beats_for(mood: Mood) -> [(&'static str, &'static str); 6] {
    match mood {
        Mood::Tense => [
            ("{clima_cap} cerca {local} {periodo}", "expectante"),
            ("{a} chega primeiro e espera por {b}", "tenso"),
            (
                "As primeiras palavras entre {a} e {b} saem carregadas de desconfiança",
                "desconfiado",
            ),
            ("{b} revela algo que muda o rumo da conversa", "crescente"),
            ("{a} confronta {b} e a tensão chega ao limite", "intenso"),
            (
                "O encontro termina sem resolução e deixa uma ameaça no ar",
                "suspenso",
            ),
        ],
        Mood::Suspense => [
            (
                "{local_cap} parece vazio {periodo}, mas alguém esteve ali há pouco",
                "inquietante",
            ),
            ("{a} percebe um detalhe fora do lugar", "atento"),
            ("{b} surge sem ser esperado", "surpreso"),
            ("Uma pista ambígua aponta para um segredo antigo", "misterioso"),
            ("{a} quase descobre a verdade, mas algo interrompe", "urgente"),
            ("A cena fecha com uma pergunta sem resposta", "aberto"),
        ],
        Mood::Emotional => [
            ("{local_cap} guarda lembranças que pesam {periodo}", "melancólico"),
            ("{a} hesita antes de se aproximar de {b}", "hesitante"),
            ("Uma conversa contida deixa escapar mágoas antigas", "contido"),
            ("{b} admite algo que nunca tinha dito", "vulnerável"),
            ("{a} deixa a emoção transparecer", "emotivo"),
            (
                "Um gesto simples aponta para uma possível reconciliação",
                "esperançoso",
            ),
        ],
        Mood::Action => [
            ("{clima_cap} castiga {local} {periodo} quando tudo começa", "urgente"),
            ("{a} percebe que {b} está no seu encalço", "alerta"),
            ("Uma corrida desesperada atravessa {local}", "acelerado"),
            ("Um obstáculo força {a} a improvisar", "tenso"),
            ("{a} e {b} ficam frente a frente", "explosivo"),
            ("A fuga termina, mas o perigo continua", "ofegante"),
        ],
        Mood::Romantic => [
            ("{local_cap} ganha outra luz {periodo}", "delicado"),
            ("{a} reconhece {b} de longe", "surpreso"),
            ("Uma conversa leve esconde o que os dois sentem", "leve"),
            ("Um silêncio longo diz mais do que as palavras", "íntimo"),
            ("{a} toma coragem e se aproxima de {b}", "corajoso"),
            ("A cena termina com uma promessa implícita", "terno"),
        ],
        Mood::Neutral => [
            ("{local_cap} se revela aos poucos {periodo}", "calmo"),
            ("{a} chega e observa o ambiente", "observador"),
            ("{a} e {b} trocam as primeiras palavras", "neutro"),
            ("Um detalhe inesperado muda a conversa", "curioso"),
            ("Uma decisão precisa ser tomada", "decisivo"),
            (
                "A cena se encerra com uma mudança sutil entre os dois",
                "reflexivo",
            ),
        ],
    }
}

/// Opening sentences describing the setting.
pub(crate) fn setting_openings(setting: &Setting) -> [&'static str; 2] {
    match setting {
        Setting::Masp => [
            "O vão livre do MASP se estendia sob a estrutura vermelha, quase deserto {periodo}.",
            "As colunas vermelhas sustentavam o MASP sobre a Avenida Paulista, e pouca gente passava por ali {periodo}.",
        ],
        Setting::Library => [
            "Entre as estantes altas da biblioteca antiga, o cheiro de papel velho pesava no ar {periodo}.",
            "A biblioteca antiga guardava um silêncio de séculos, quebrado apenas pelo estalar da madeira {periodo}.",
        ],
        Setting::Cafe => [
            "O café estava cheio de vozes baixas e xícaras tilintando {periodo}.",
            "No balcão do café, o vapor da máquina subia em nuvens curtas {periodo}.",
        ],
        Setting::Subway => [
            "Na plataforma da estação de metrô, o ar quente dos túneis chegava em rajadas {periodo}.",
            "Os avisos sonoros ecoavam pela estação de metrô {periodo}, e a multidão passava sem olhar para ninguém.",
        ],
        Setting::Beach => [
            "A praia se abria larga, com o mar batendo sem pressa {periodo}.",
            "Na areia da praia, as marcas de passos se apagavam a cada onda {periodo}.",
        ],
        Setting::Hospital => [
            "O corredor do hospital cheirava a desinfetante, e as luzes brancas não deixavam sombra {periodo}.",
            "No hospital, o ruído constante das máquinas marcava o tempo {periodo}.",
        ],
        Setting::Park => [
            "O parque parecia maior do que de costume {periodo}, com os bancos quase todos vazios.",
            "As árvores do parque balançavam devagar {periodo}.",
        ],
        Setting::Home => [
            "O apartamento estava em penumbra {periodo}, com as cortinas meio fechadas.",
            "Dentro do apartamento, o relógio da cozinha era o único som {periodo}.",
        ],
        Setting::Named(_) => [
            "Em {local}, o tempo parecia andar mais devagar {periodo}.",
            "Em {local}, tudo estava estranhamente quieto {periodo}.",
        ],
        Setting::Unspecified => [
            "O lugar combinado estava mais quieto do que deveria {periodo}.",
            "Nada naquele lugar chamava atenção {periodo}, e talvez por isso tivesse sido escolhido.",
        ],
    }
}

/// Sentences describing the weather.
pub(crate) fn weather_lines(weather: Weather) -> [&'static str; 2] {
    match weather {
        Weather::Rain => [
            "A chuva caía em cortinas finas, e cada gota devolvia as luzes da cidade.",
            "A água escorria pelas superfícies em fios brilhantes, e o barulho da chuva abafava o resto.",
        ],
        Weather::Sun => [
            "O sol forte apagava as cores e obrigava todos a apertar os olhos.",
            "O calor subia do chão em ondas visíveis.",
        ],
        Weather::Fog => [
            "A neblina engolia os contornos, e as pessoas surgiam de repente, como se viessem do nada.",
            "Uma névoa baixa deixava tudo a meia distância.",
        ],
        Weather::Unspecified => [
            "O ar estava parado.",
            "Havia uma calma estranha no ar, do tipo que antecede alguma coisa.",
        ],
    }
}

/// Narrative movements, from arrival to resolution.
pub(crate) const MOVEMENTS: [[&str; 2]; 6] = [
    [
        "{a} olhou em volta e conferiu o relógio mais uma vez.",
        "{a} respirou fundo antes de dar o primeiro passo.",
    ],
    [
        "Quando {b} apareceu, houve um instante em que ninguém se mexeu.",
        "\"Você veio\", disse {b}, sem estender a mão.",
    ],
    [
        "\"Não temos muito tempo\", disse {a}. \"Fale logo o que sabe.\"",
        "As perguntas vieram rápidas demais, e {b} demorou a responder.",
    ],
    [
        "{b} tirou do bolso um papel dobrado e o deixou entre os dois, sem dizer nada.",
        "\"Eu sei o que você escondeu\", murmurou {b}.",
    ],
    [
        "{a} sentiu o chão faltar por um segundo, mas não desviou o olhar.",
        "\"Então é verdade\", disse {a}, com a voz mais baixa do que pretendia.",
    ],
    [
        "Ninguém disse mais nada. {clima_cap} continuou, indiferente ao que acabara de mudar.",
        "{a} foi embora primeiro, levando mais perguntas do que respostas.",
    ],
];

/// Short exchange used when the brief names at least two characters.
pub(crate) const EXCHANGES: [&str; 2] = [
    "\"Você sabe por que estou aqui\", disse {a}. \"Sei\", respondeu {b}. \"E preferia não saber.\"",
    "\"Achei que você não viria\", disse {b}. \"Eu também\", respondeu {a}, sem sorrir.",
];

/// Last paragraph of a scene.
pub(crate) const CLOSINGS: [&str; 2] = [
    "Lá fora, {clima} seguia igual {periodo}, como se nada tivesse acontecido.",
    "Quando tudo acabou, {local} voltou ao seu silêncio de sempre.",
];

/// Generic beat used when every other source of a plan failed.
pub(crate) const PLACEHOLDER_BEAT: (&str, &str) = (
    "Duas pessoas se encontram e algo muda entre elas",
    "neutro",
);

/// Generic prose used when every other source of a scene failed.
pub(crate) const PLACEHOLDER_PROSE: &str = "A cena acontece quase em silêncio. \
Duas pessoas se encontram, trocam poucas palavras e partem diferentes de como chegaram.";
