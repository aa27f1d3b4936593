//! Seed list of specialized playlist templates.
//!
//! Templates are identified by name; seeding is idempotent on that name.

/// A curated playlist whose tracks are regenerated daily from keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaylistTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub keywords: &'static str,
    pub target_song_count: u32,
}

pub const SEED_TEMPLATES: &[PlaylistTemplate] = &[
    PlaylistTemplate {
        name: "Morning Focus Flow",
        description: "Instrumental electronic and ambient music to help you concentrate and start your day productively.",
        keywords: "instrumental electronic, ambient, focus, concentration, no lyrics, morning, productive, study, work",
        target_song_count: 10,
    },
    PlaylistTemplate {
        name: "Workout Power Hour",
        description: "High-energy tracks to fuel your workout session.",
        keywords: "high-energy, workout, gym, running, power, upbeat, electronic, pop, rock",
        target_song_count: 12,
    },
    PlaylistTemplate {
        name: "Chill Evening Vibes",
        description: "Relaxing tunes to unwind in the evening.",
        keywords: "chill, relaxing, evening, unwind, lofi, acoustic, jazz, calm",
        target_song_count: 8,
    },
    PlaylistTemplate {
        name: "Coding Deep Dive",
        description: "Instrumental tracks to keep you in the zone while coding.",
        keywords: "coding, programming, instrumental, electronic, focus, deep work, no distractions",
        target_song_count: 15,
    },
    PlaylistTemplate {
        name: "Sunday Morning Coffee",
        description: "Laid-back acoustic and indie tunes to ease into your Sunday.",
        keywords: "acoustic, indie, calm, soft, mellow, sunday, morning, relaxing, cozy",
        target_song_count: 10,
    },
    PlaylistTemplate {
        name: "Late Night Drive",
        description: "Atmospheric and moody tracks for reflective late-night drives.",
        keywords: "moody, atmospheric, synth, night, drive, introspective, chill, ambient, cinematic",
        target_song_count: 12,
    },
    PlaylistTemplate {
        name: "Feel-Good Hits",
        description: "Uplifting and catchy songs to boost your mood.",
        keywords: "feel-good, upbeat, pop, dance, happy, energy, catchy, summer",
        target_song_count: 10,
    },
    PlaylistTemplate {
        name: "Rainy Day Reading",
        description: "Soft piano and ambient music perfect for reading on a rainy day.",
        keywords: "piano, ambient, instrumental, soft, reading, rain, calm, classical, introspective",
        target_song_count: 8,
    },
    PlaylistTemplate {
        name: "Party Starter",
        description: "High-energy party anthems to get everyone on their feet.",
        keywords: "party, dance, edm, pop, hip-hop, upbeat, energy, fun, anthems",
        target_song_count: 15,
    },
    PlaylistTemplate {
        name: "Study Burnout Recovery",
        description: "Gentle, comforting music to help you reset after intense study sessions.",
        keywords: "recovery, study, burnout, gentle, soft, acoustic, lo-fi, chill, decompress, reset",
        target_song_count: 10,
    },
    PlaylistTemplate {
        name: "Creative Flow",
        description: "Inspiring and rhythmic instrumentals to spark your creativity.",
        keywords: "creative, inspiration, instrumental, beats, rhythmic, ambient, art, design, writing, flow",
        target_song_count: 12,
    },
    PlaylistTemplate {
        name: "Anxiety Relief Mix",
        description: "Soothing ambient and slow-tempo tracks to help calm your mind.",
        keywords: "calm, anxiety, relief, ambient, slow tempo, peaceful, minimal, nature sounds, therapeutic",
        target_song_count: 8,
    },
    PlaylistTemplate {
        name: "Confidence Boost",
        description: "Empowering anthems to boost your confidence and self-esteem.",
        keywords: "confidence, empowerment, upbeat, bold, pop, hip-hop, anthems, motivation, self-love",
        target_song_count: 10,
    },
    PlaylistTemplate {
        name: "Focus & Flow for ADHD",
        description: "Repetitive, no-vocal tracks designed to reduce distraction and aid sustained focus.",
        keywords: "ADHD, focus, no vocals, repetitive, electronic, study, work, deep concentration, instrumental",
        target_song_count: 15,
    },
];
